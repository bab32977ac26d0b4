//! Marker rules and the shared marker scanner
//!
//! Both the tokenizer and the plain projector are driven by [`Markers`],
//! so they can never disagree about which bytes are marker syntax.
//!
//! Rules are tried in a fixed precedence order at every candidate
//! position; the first rule that matches wins and scanning resumes right
//! after the consumed match. Content is matched lazily (shortest span).
//! Closer lookups are memoized per rule, which keeps a line scan linear
//! even when many openers never find a closer.

use std::ops::Range;

use super::style::{ColorVariant, Style};

/// A single marker rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// `#X(CONTENT)`, CONTENT may be empty and cannot contain `)`
    Color,
    /// `**CONTENT**`
    DoubleBold,
    /// `*CONTENT*`
    SingleBold,
    /// `_CONTENT_`, not flanked by word characters
    Italic,
    /// `~CONTENT~`
    Strike,
}

impl Rule {
    /// All rules, highest precedence first
    pub const PRECEDENCE: [Rule; 5] = [
        Rule::Color,
        Rule::DoubleBold,
        Rule::SingleBold,
        Rule::Italic,
        Rule::Strike,
    ];

    /// Try this rule anchored at `at` within a single line
    ///
    /// `stop` is the first `\r` after the opener (or the line length).
    /// Emphasis content may not reach it; color content may.
    fn match_at(
        &self,
        line: &[u8],
        at: usize,
        stop: usize,
        closers: &mut Closers,
    ) -> Option<MarkerMatch> {
        match self {
            Rule::Color => {
                if line.get(at) != Some(&b'#') {
                    return None;
                }
                let variant = line
                    .get(at + 1)
                    .and_then(|&b| ColorVariant::from_code(b as char))?;
                if line.get(at + 2) != Some(&b'(') {
                    return None;
                }
                let close = closers.paren.find(line, at + 3, |l, i| l[i] == b')')?;
                Some(MarkerMatch::new(at, close + 1, at + 3..close, Style::Color(variant)))
            }
            Rule::DoubleBold => {
                if !line[at..].starts_with(b"**") {
                    return None;
                }
                let close = closers
                    .double_star
                    .find(line, at + 3, |l, i| l[i] == b'*' && l.get(i + 1) == Some(&b'*'))
                    .filter(|&close| close <= stop)?;
                Some(MarkerMatch::new(at, close + 2, at + 2..close, Style::Bold))
            }
            Rule::SingleBold => {
                if line[at] != b'*' {
                    return None;
                }
                let close = closers
                    .star
                    .find(line, at + 2, |l, i| l[i] == b'*')
                    .filter(|&close| close <= stop)?;
                Some(MarkerMatch::new(at, close + 1, at + 1..close, Style::Bold))
            }
            Rule::Italic => {
                if line[at] != b'_' || (at > 0 && is_word_byte(line[at - 1])) {
                    return None;
                }
                let close = closers
                    .underscore
                    .find(line, at + 2, |l, i| {
                        l[i] == b'_' && !l.get(i + 1).is_some_and(|&b| is_word_byte(b))
                    })
                    .filter(|&close| close <= stop)?;
                Some(MarkerMatch::new(at, close + 1, at + 1..close, Style::Italic))
            }
            Rule::Strike => {
                if line[at] != b'~' {
                    return None;
                }
                let close = closers
                    .tilde
                    .find(line, at + 2, |l, i| l[i] == b'~')
                    .filter(|&close| close <= stop)?;
                Some(MarkerMatch::new(at, close + 1, at + 1..close, Style::Strike))
            }
        }
    }
}

/// ASCII word character, as used by the italic boundary guard
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Bytes that can start a marker
fn is_opener(b: u8) -> bool {
    matches!(b, b'#' | b'*' | b'_' | b'~')
}

/// One recognized marker, as byte ranges into the scanned text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    /// Start of the opening marker (inclusive)
    pub start: usize,
    /// End of the closing marker (exclusive)
    pub end: usize,
    /// The content between the markers
    pub content: Range<usize>,
    /// Style assigned to the content
    pub style: Style,
}

impl MarkerMatch {
    fn new(start: usize, end: usize, content: Range<usize>, style: Style) -> Self {
        Self { start, end, content, style }
    }

    fn offset(self, base: usize) -> Self {
        Self {
            start: self.start + base,
            end: self.end + base,
            content: self.content.start + base..self.content.end + base,
            style: self.style,
        }
    }
}

/// Memoized "first closer at or after" lookup for one rule
///
/// Query starts never decrease within a line, so a cached hit at or
/// beyond the new start is still the first one, and a cached miss stays
/// a miss.
#[derive(Debug, Default)]
struct CloserCache {
    last: Option<(usize, Option<usize>)>,
}

impl CloserCache {
    fn find(
        &mut self,
        line: &[u8],
        start: usize,
        is_closer: impl Fn(&[u8], usize) -> bool,
    ) -> Option<usize> {
        if let Some((from, hit)) = self.last {
            if start >= from {
                match hit {
                    None => return None,
                    Some(i) if i >= start => return Some(i),
                    Some(_) => {}
                }
            }
        }
        let hit = (start..line.len()).find(|&i| is_closer(line, i));
        self.last = Some((start, hit));
        hit
    }
}

#[derive(Debug, Default)]
struct Closers {
    carriage_return: CloserCache,
    paren: CloserCache,
    double_star: CloserCache,
    star: CloserCache,
    underscore: CloserCache,
    tilde: CloserCache,
}

/// Scanner over a single line (no `\n` inside)
#[derive(Debug)]
struct LineScanner<'a> {
    line: &'a [u8],
    base: usize,
    pos: usize,
    closers: Closers,
}

impl<'a> LineScanner<'a> {
    fn new(line: &'a str, base: usize) -> Self {
        Self {
            line: line.as_bytes(),
            base,
            pos: 0,
            closers: Closers::default(),
        }
    }

    fn match_at(&mut self, at: usize) -> Option<MarkerMatch> {
        let stop = self
            .closers
            .carriage_return
            .find(self.line, at + 1, |l, i| l[i] == b'\r')
            .unwrap_or(self.line.len());
        Rule::PRECEDENCE
            .iter()
            .find_map(|rule| rule.match_at(self.line, at, stop, &mut self.closers))
    }
}

impl Iterator for LineScanner<'_> {
    type Item = MarkerMatch;

    fn next(&mut self) -> Option<MarkerMatch> {
        while let Some(skip) = self.line[self.pos..].iter().position(|&b| is_opener(b)) {
            let at = self.pos + skip;
            if let Some(m) = self.match_at(at) {
                self.pos = m.end;
                return Some(m.offset(self.base));
            }
            self.pos = at + 1;
        }
        self.pos = self.line.len();
        None
    }
}

/// Iterator over every marker in a text, left to right
///
/// Lines are scanned independently; no marker spans a `\n`. Emphasis
/// content also stops at `\r`.
#[derive(Debug)]
pub struct Markers<'a> {
    rest: Option<&'a str>,
    rest_base: usize,
    current: Option<LineScanner<'a>>,
}

impl<'a> Markers<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: Some(text),
            rest_base: 0,
            current: None,
        }
    }

    fn next_line(&mut self) -> Option<LineScanner<'a>> {
        let rest = self.rest.take()?;
        let base = self.rest_base;
        let line = match rest.split_once('\n') {
            Some((line, tail)) => {
                self.rest = Some(tail);
                self.rest_base = base + line.len() + 1;
                line
            }
            None => rest,
        };
        Some(LineScanner::new(line, base))
    }
}

impl Iterator for Markers<'_> {
    type Item = MarkerMatch;

    fn next(&mut self) -> Option<MarkerMatch> {
        loop {
            if let Some(m) = self.current.as_mut().and_then(Iterator::next) {
                return Some(m);
            }
            self.current = Some(self.next_line()?);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(text: &str) -> Vec<(Range<usize>, Style)> {
        Markers::new(text).map(|m| (m.content, m.style)).collect()
    }

    #[test]
    fn test_precedence_order() {
        assert_eq!(Rule::PRECEDENCE[0], Rule::Color);
        assert_eq!(Rule::PRECEDENCE[1], Rule::DoubleBold);
        assert_eq!(Rule::PRECEDENCE[4], Rule::Strike);
    }

    #[test]
    fn test_marker_ranges() {
        let found: Vec<_> = Markers::new("a **b** c").collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 2);
        assert_eq!(found[0].end, 7);
        assert_eq!(found[0].content, 4..5);
        assert_eq!(found[0].style, Style::Bold);
    }

    #[test]
    fn test_offsets_across_lines() {
        let found = matches("x\n~y~");
        assert_eq!(found, vec![(3..4, Style::Strike)]);
    }

    #[test]
    fn test_color_requires_known_letter() {
        assert!(matches("#x(nope)").is_empty());
        assert_eq!(
            matches("#G(ok)"),
            vec![(3..5, Style::Color(ColorVariant::Green))]
        );
    }

    #[test]
    fn test_color_allows_empty_content() {
        assert_eq!(matches("#r()"), vec![(3..3, Style::Color(ColorVariant::Red))]);
    }

    #[test]
    fn test_emphasis_requires_content() {
        assert!(matches("**").is_empty());
        assert!(matches("__").is_empty());
        assert!(matches("~~").is_empty());
    }

    #[test]
    fn test_markers_do_not_span_lines() {
        assert!(matches("*a\nb*").is_empty());
        assert!(matches("#r(a\nb)").is_empty());
    }

    #[test]
    fn test_carriage_return_stops_emphasis_content() {
        assert!(matches("a *b\rc*").is_empty());
        assert!(matches("**b\rc**").is_empty());
        assert!(matches("_b\rc_").is_empty());
        assert!(matches("~b\rc~").is_empty());
        // A closer before the `\r` still matches
        assert_eq!(matches("*b*\r"), vec![(1..2, Style::Bold)]);
        // Color content is `[^)]*` and may hold a `\r`
        assert_eq!(
            matches("#y(a\rb)"),
            vec![(3..6, Style::Color(ColorVariant::Yellow))]
        );
    }

    #[test]
    fn test_italic_closer_skips_word_followed_underscore() {
        // The first closing candidate is followed by a word char
        assert_eq!(matches("_a_b c_"), vec![(1..6, Style::Italic)]);
    }

    #[test]
    fn test_closer_cache_reuses_hits() {
        let mut cache = CloserCache::default();
        let line = b"a*b*c";
        assert_eq!(cache.find(line, 0, |l, i| l[i] == b'*'), Some(1));
        assert_eq!(cache.find(line, 1, |l, i| l[i] == b'*'), Some(1));
        assert_eq!(cache.find(line, 2, |l, i| l[i] == b'*'), Some(3));
        assert_eq!(cache.find(line, 4, |l, i| l[i] == b'*'), None);
        assert_eq!(cache.find(line, 5, |l, i| l[i] == b'*'), None);
    }

    #[test]
    fn test_many_unclosed_openers() {
        let text = "_a ".repeat(20_000);
        assert!(matches(&text).is_empty());
        // Every five stars form `**` + `*` + `**`
        let stars = "*".repeat(40_000);
        assert_eq!(Markers::new(&stars).count(), 8_000);
    }
}
