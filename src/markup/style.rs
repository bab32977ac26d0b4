//! Style and segment types for inline note markup
//!
//! A tokenized line is a flat sequence of segments, each either plain
//! text or a run carrying exactly one style.

/// A 24-bit display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The fixed set of colors a `#x(...)` span can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorVariant {
    Red,
    Blue,
    Green,
    Yellow,
}

impl ColorVariant {
    /// Resolve a variant from its marker letter (case-insensitive)
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'r' => Some(ColorVariant::Red),
            'b' => Some(ColorVariant::Blue),
            'g' => Some(ColorVariant::Green),
            'y' => Some(ColorVariant::Yellow),
            _ => None,
        }
    }

    /// Display color for this variant
    pub fn rgb(&self) -> Rgb {
        match self {
            ColorVariant::Red => Rgb::new(0xEF, 0x44, 0x44),
            ColorVariant::Blue => Rgb::new(0x3B, 0x82, 0xF6),
            ColorVariant::Green => Rgb::new(0x22, 0xC5, 0x5E),
            ColorVariant::Yellow => Rgb::new(0xEA, 0xB3, 0x08),
        }
    }

    /// Display color as a `#RRGGBB` constant
    pub fn hex(&self) -> &'static str {
        match self {
            ColorVariant::Red => "#EF4444",
            ColorVariant::Blue => "#3B82F6",
            ColorVariant::Green => "#22C55E",
            ColorVariant::Yellow => "#EAB308",
        }
    }
}

/// Style carried by a styled segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// `**text**` or `*text*`
    Bold,
    /// `_text_`
    Italic,
    /// `~text~`
    Strike,
    /// `#r(text)`, `#b(text)`, `#g(text)`, `#y(text)`
    Color(ColorVariant),
}

/// A contiguous run of tokenized text
///
/// Segments borrow from the tokenized input. Styled segments hold only the
/// content between the markers, never the markers themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Styled(Style, &'a str),
}

impl<'a> Segment<'a> {
    /// The visible text of this segment
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Plain(text) | Segment::Styled(_, text) => text,
        }
    }

    /// The style, if this is a styled segment
    pub fn style(&self) -> Option<Style> {
        match self {
            Segment::Plain(_) => None,
            Segment::Styled(style, _) => Some(*style),
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Segment::Plain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(ColorVariant::from_code('r'), Some(ColorVariant::Red));
        assert_eq!(ColorVariant::from_code('B'), Some(ColorVariant::Blue));
        assert_eq!(ColorVariant::from_code('g'), Some(ColorVariant::Green));
        assert_eq!(ColorVariant::from_code('Y'), Some(ColorVariant::Yellow));
        assert_eq!(ColorVariant::from_code('x'), None);
        assert_eq!(ColorVariant::from_code('('), None);
    }

    #[test]
    fn test_palette_hex_matches_rgb() {
        for code in ['r', 'b', 'g', 'y'] {
            let variant = ColorVariant::from_code(code).unwrap();
            let rgb = variant.rgb();
            let hex = format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b);
            assert_eq!(hex, variant.hex());
        }
    }

    #[test]
    fn test_segment_accessors() {
        let plain = Segment::Plain("hello");
        assert_eq!(plain.text(), "hello");
        assert_eq!(plain.style(), None);
        assert!(plain.is_plain());

        let bold = Segment::Styled(Style::Bold, "loud");
        assert_eq!(bold.text(), "loud");
        assert_eq!(bold.style(), Some(Style::Bold));
        assert!(!bold.is_plain());
    }
}
