//! Tokenizer: raw note text to styled segments

use super::rules::Markers;
use super::style::Segment;

/// Tokenize text into an ordered, non-overlapping sequence of segments
///
/// Text outside any marker is emitted verbatim as plain segments (plain
/// runs may contain `\n`). Unterminated markers degrade to plain text.
/// Concatenating the segment texts yields [`project`](super::project).
pub fn tokenize(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;

    for m in Markers::new(text) {
        if m.start > plain_start {
            segments.push(Segment::Plain(&text[plain_start..m.start]));
        }
        segments.push(Segment::Styled(m.style, &text[m.content]));
        plain_start = m.end;
    }

    if plain_start < text.len() {
        segments.push(Segment::Plain(&text[plain_start..]));
    }

    segments
}

/// Tokenize each `\n`-separated line independently
///
/// Always yields at least one line; an empty line yields no segments.
pub fn tokenize_lines(text: &str) -> impl Iterator<Item = Vec<Segment<'_>>> {
    text.split('\n').map(tokenize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::style::{ColorVariant, Style};

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_plain_only() {
        assert_eq!(tokenize("just words"), vec![Segment::Plain("just words")]);
    }

    #[test]
    fn test_double_bold_precedence() {
        assert_eq!(
            tokenize("**bold** and *also bold*"),
            vec![
                Segment::Styled(Style::Bold, "bold"),
                Segment::Plain(" and "),
                Segment::Styled(Style::Bold, "also bold"),
            ]
        );
    }

    #[test]
    fn test_color_span() {
        assert_eq!(
            tokenize("#r(urgent) task"),
            vec![
                Segment::Styled(Style::Color(ColorVariant::Red), "urgent"),
                Segment::Plain(" task"),
            ]
        );
    }

    #[test]
    fn test_color_letter_case_insensitive() {
        assert_eq!(
            tokenize("#Y(note)"),
            vec![Segment::Styled(Style::Color(ColorVariant::Yellow), "note")]
        );
    }

    #[test]
    fn test_unknown_color_letter_is_plain() {
        assert_eq!(tokenize("#q(nope)"), vec![Segment::Plain("#q(nope)")]);
    }

    #[test]
    fn test_color_content_stops_at_first_paren() {
        assert_eq!(
            tokenize("#b(f(x)) done"),
            vec![
                Segment::Styled(Style::Color(ColorVariant::Blue), "f(x"),
                Segment::Plain(") done"),
            ]
        );
    }

    #[test]
    fn test_unterminated_marker() {
        assert_eq!(tokenize("price is *5"), vec![Segment::Plain("price is *5")]);
    }

    #[test]
    fn test_word_boundary_guard() {
        let segments = tokenize("a_b_c");
        assert!(segments.iter().all(|s| s.style() != Some(Style::Italic)));
        assert_eq!(segments, vec![Segment::Plain("a_b_c")]);

        assert_eq!(
            tokenize("hello _world_ today"),
            vec![
                Segment::Plain("hello "),
                Segment::Styled(Style::Italic, "world"),
                Segment::Plain(" today"),
            ]
        );
    }

    #[test]
    fn test_snake_case_identifier() {
        assert_eq!(
            tokenize("call snake_case_name now"),
            vec![Segment::Plain("call snake_case_name now")]
        );
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(
            tokenize("~old~ new"),
            vec![Segment::Styled(Style::Strike, "old"), Segment::Plain(" new")]
        );
    }

    #[test]
    fn test_adjacent_single_and_double_stars() {
        // Double-bold is tried first but cannot close, so single-bold splits
        assert_eq!(
            tokenize("*a**b*"),
            vec![
                Segment::Styled(Style::Bold, "a"),
                Segment::Styled(Style::Bold, "b"),
            ]
        );
    }

    #[test]
    fn test_lazy_content() {
        assert_eq!(
            tokenize("*a* b *c*"),
            vec![
                Segment::Styled(Style::Bold, "a"),
                Segment::Plain(" b "),
                Segment::Styled(Style::Bold, "c"),
            ]
        );
    }

    #[test]
    fn test_empty_color_span() {
        assert_eq!(
            tokenize("x#g()y"),
            vec![
                Segment::Plain("x"),
                Segment::Styled(Style::Color(ColorVariant::Green), ""),
                Segment::Plain("y"),
            ]
        );
    }

    #[test]
    fn test_marker_does_not_continue_onto_next_line() {
        assert_eq!(tokenize("*open\nclose*"), vec![Segment::Plain("*open\nclose*")]);
    }

    #[test]
    fn test_multiline_plain_runs_keep_newlines() {
        assert_eq!(
            tokenize("**hi**\n_yo_"),
            vec![
                Segment::Styled(Style::Bold, "hi"),
                Segment::Plain("\n"),
                Segment::Styled(Style::Italic, "yo"),
            ]
        );
    }

    #[test]
    fn test_tokenize_lines() {
        let lines: Vec<_> = tokenize_lines("**hi**\n\n_yo_").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![Segment::Styled(Style::Bold, "hi")]);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2], vec![Segment::Styled(Style::Italic, "yo")]);
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(
            tokenize("café *naïve* ~ü~"),
            vec![
                Segment::Plain("café "),
                Segment::Styled(Style::Bold, "naïve"),
                Segment::Plain(" "),
                Segment::Styled(Style::Strike, "ü"),
            ]
        );
    }
}
