//! Case-insensitive search highlighting

use std::ops::Range;

use regex::{Regex, RegexBuilder};
use tracing::warn;

/// A run of searched text, tagged as matching the query or not
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl<'a> MatchSpan<'a> {
    pub fn matched(text: &'a str) -> Self {
        Self { text, matched: true }
    }

    pub fn unmatched(text: &'a str) -> Self {
        Self { text, matched: false }
    }
}

/// How a non-empty query is located in text
#[derive(Debug, Clone)]
enum Matcher {
    /// Empty query: everything matches, nothing is marked
    Everything,
    /// Escaped, case-insensitive regex
    Pattern(Regex),
    /// Per-character case-folded scan, for queries too large to compile
    Folded(Vec<char>),
}

/// A compiled search query
///
/// The query is matched literally and case-insensitively. Compile once and
/// reuse it for every title, content and tag in a listing.
#[derive(Debug, Clone)]
pub struct Highlighter {
    query: String,
    matcher: Matcher,
}

impl Highlighter {
    pub fn new(query: &str) -> Self {
        Self::build(query, None)
    }

    fn build(query: &str, size_limit: Option<usize>) -> Self {
        let matcher = if query.is_empty() {
            Matcher::Everything
        } else {
            let mut builder = RegexBuilder::new(&regex::escape(query));
            builder.case_insensitive(true);
            if let Some(limit) = size_limit {
                builder.size_limit(limit);
            }
            match builder.build() {
                Ok(pattern) => Matcher::Pattern(pattern),
                Err(err) => {
                    warn!(%err, "search query too large for regex, using folded scan");
                    Matcher::Folded(query.chars().collect())
                }
            }
        };
        Self {
            query: query.to_string(),
            matcher,
        }
    }

    /// The query as given
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the query is empty (everything matches, nothing is marked)
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Whether `text` contains the query
    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Everything => true,
            Matcher::Pattern(pattern) => pattern.is_match(text),
            Matcher::Folded(query) => !find_folded(text, query).is_empty(),
        }
    }

    /// Byte ranges of every match, left to right, non-overlapping
    fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        match &self.matcher {
            Matcher::Everything => Vec::new(),
            Matcher::Pattern(pattern) => pattern.find_iter(text).map(|m| m.range()).collect(),
            Matcher::Folded(query) => find_folded(text, query),
        }
    }

    /// Split `text` into alternating unmatched and matched spans
    ///
    /// Matches are non-overlapping and leftmost-first; scanning resumes
    /// right after each match. Concatenating the spans gives back `text`.
    pub fn highlight<'a>(&self, text: &'a str) -> Vec<MatchSpan<'a>> {
        let mut spans = Vec::new();
        let mut last = 0;
        for range in self.find_all(text) {
            if range.start > last {
                spans.push(MatchSpan::unmatched(&text[last..range.start]));
            }
            last = range.end;
            spans.push(MatchSpan::matched(&text[range]));
        }
        if last < text.len() || spans.is_empty() {
            spans.push(MatchSpan::unmatched(&text[last..]));
        }
        spans
    }
}

/// Case-insensitive character comparison
fn fold_eq(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Length in bytes of a folded match of `query` at the start of `text`
fn match_folded_at(text: &str, query: &[char]) -> Option<usize> {
    let mut chars = text.char_indices();
    for &q in query {
        let (_, c) = chars.next()?;
        if !fold_eq(c, q) {
            return None;
        }
    }
    Some(chars.next().map_or(text.len(), |(i, _)| i))
}

/// Non-overlapping folded matches of a non-empty `query`
fn find_folded(text: &str, query: &[char]) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut start = 0;
    while start < text.len() {
        match match_folded_at(&text[start..], query) {
            Some(len) if len > 0 => {
                found.push(start..start + len);
                start += len;
            }
            _ => start += text[start..].chars().next().map_or(1, char::len_utf8),
        }
    }
    found
}

/// Highlight occurrences of `query` in `text`
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<MatchSpan<'a>> {
    Highlighter::new(query).highlight(text)
}
