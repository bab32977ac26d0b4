//! Plain projector: the canonical unstyled text used for search

use super::rules::Markers;

/// Strip marker syntax from text, keeping marker content verbatim
///
/// Uses the same scanner as [`tokenize`](super::tokenize), so the result
/// always equals the concatenated segment texts.
pub fn project(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut copied = 0;

    for m in Markers::new(text) {
        plain.push_str(&text[copied..m.start]);
        plain.push_str(&text[m.content]);
        copied = m.end;
    }
    plain.push_str(&text[copied..]);

    plain
}
