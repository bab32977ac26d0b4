//! HTML backend for display trees

use super::{DisplayTree, Emphasis, Node};

/// Serialize a display tree as an HTML fragment
pub fn to_html(tree: &DisplayTree) -> String {
    let mut out = String::new();
    for node in tree.nodes() {
        match node {
            Node::Text(text) => escape_into(&mut out, text),
            Node::Styled(emphasis, text) => {
                let (open, close) = tags(*emphasis);
                out.push_str(&open);
                escape_into(&mut out, text);
                out.push_str(close);
            }
            Node::Break => out.push_str("<br>"),
        }
    }
    out
}

fn tags(emphasis: Emphasis) -> (String, &'static str) {
    match emphasis {
        Emphasis::Strong => ("<strong>".to_string(), "</strong>"),
        Emphasis::Emphasis => ("<em>".to_string(), "</em>"),
        Emphasis::Strikethrough => ("<s>".to_string(), "</s>"),
        Emphasis::Foreground(variant) => {
            (format!("<span style=\"color: {}\">", variant.hex()), "</span>")
        }
        Emphasis::Mark => ("<mark>".to_string(), "</mark>"),
    }
}

fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_highlight, render_text};
    use crate::search::highlight;

    #[test]
    fn test_html_styles() {
        let html = to_html(&render_text("**a** _b_ ~c~ #b(d)"));
        assert_eq!(
            html,
            "<strong>a</strong> <em>b</em> <s>c</s> <span style=\"color: #3B82F6\">d</span>"
        );
    }

    #[test]
    fn test_html_breaks() {
        assert_eq!(to_html(&render_text("one\ntwo")), "one<br>two");
    }

    #[test]
    fn test_html_escapes_text() {
        assert_eq!(
            to_html(&render_text("*<b>* & \"q\"")),
            "<strong>&lt;b&gt;</strong> &amp; &quot;q&quot;"
        );
    }

    #[test]
    fn test_html_mark() {
        let html = to_html(&render_highlight(&highlight("Buy milk", "MILK")));
        assert_eq!(html, "Buy <mark>milk</mark>");
    }
}
