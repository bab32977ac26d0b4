//! Terminal backend for display trees using crossterm

use std::io::Write;

use crossterm::{
    queue,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
};

use super::{DisplayTree, Emphasis, Node};
use crate::error::Result;
use crate::markup::Rgb;

/// Background used for search matches
const MARK_BACKGROUND: Rgb = Rgb::new(0xFD, 0xE0, 0x47);

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Write a display tree to a terminal
///
/// With `colors` off only the text and line breaks are written.
pub fn write_tree<W: Write>(out: &mut W, tree: &DisplayTree, colors: bool) -> Result<()> {
    for node in tree.nodes() {
        match node {
            Node::Text(text) => queue!(out, Print(text))?,
            Node::Styled(_, text) if !colors => queue!(out, Print(text))?,
            Node::Styled(emphasis, text) => {
                set_emphasis(out, *emphasis)?;
                queue!(out, Print(text), SetAttribute(Attribute::Reset), ResetColor)?;
            }
            Node::Break => queue!(out, Print("\n"))?,
        }
    }
    out.flush()?;
    Ok(())
}

fn set_emphasis<W: Write>(out: &mut W, emphasis: Emphasis) -> Result<()> {
    match emphasis {
        Emphasis::Strong => queue!(out, SetAttribute(Attribute::Bold))?,
        Emphasis::Emphasis => queue!(out, SetAttribute(Attribute::Italic))?,
        Emphasis::Strikethrough => queue!(out, SetAttribute(Attribute::CrossedOut))?,
        Emphasis::Foreground(variant) => {
            queue!(out, SetForegroundColor(to_color(variant.rgb())))?
        }
        Emphasis::Mark => queue!(
            out,
            SetBackgroundColor(to_color(MARK_BACKGROUND)),
            SetForegroundColor(Color::Black)
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render_text;

    fn write_to_string(text: &str, colors: bool) -> String {
        let mut out = Vec::new();
        write_tree(&mut out, &render_text(text), colors).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_output_without_colors() {
        assert_eq!(write_to_string("**a** #r(b)\n~c~", false), "a b\nc");
    }

    #[test]
    fn test_styled_output_has_escapes() {
        let out = write_to_string("**bold**", true);
        assert!(out.contains("bold"));
        assert!(out.contains("\x1b[1m"));
    }

    #[test]
    fn test_color_output_uses_rgb() {
        let out = write_to_string("#g(go)", true);
        assert!(out.contains("38;2;34;197;94"));
    }
}
