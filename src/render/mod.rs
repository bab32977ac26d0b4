//! Display tree rendering
//!
//! Segments and search matches are mapped into a flat display tree of
//! text runs, styled runs and explicit line breaks. The tree can then be
//! written out by a backend ([`html`] or [`ansi`]).

pub mod ansi;
pub mod html;

use crate::markup::{tokenize_lines, ColorVariant, Segment, Style};
use crate::search::MatchSpan;

/// Emphasis applied to a styled run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Bold weight
    Strong,
    /// Italic
    Emphasis,
    /// Struck through
    Strikethrough,
    /// Foreground color override from the fixed palette
    Foreground(ColorVariant),
    /// Search match highlight
    Mark,
}

impl From<Style> for Emphasis {
    fn from(style: Style) -> Self {
        match style {
            Style::Bold => Emphasis::Strong,
            Style::Italic => Emphasis::Emphasis,
            Style::Strike => Emphasis::Strikethrough,
            Style::Color(variant) => Emphasis::Foreground(variant),
        }
    }
}

/// A single display node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Unstyled text (never contains `\n`)
    Text(String),
    /// Styled text (never contains `\n`)
    Styled(Emphasis, String),
    /// Line boundary
    Break,
}

/// Display-ready rendering of note text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTree {
    nodes: Vec<Node>,
}

impl DisplayTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes in display order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of display lines (break count + 1, or 0 when empty)
    pub fn line_count(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        1 + self.nodes.iter().filter(|n| matches!(n, Node::Break)).count()
    }

    /// Append a line break
    pub fn push_break(&mut self) {
        self.nodes.push(Node::Break);
    }

    /// Append text, turning every `\n` into a break
    ///
    /// Empty runs produce no node.
    pub fn push_text(&mut self, text: &str, emphasis: Option<Emphasis>) {
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.push_run(first, emphasis);
        }
        for line in lines {
            self.push_break();
            self.push_run(line, emphasis);
        }
    }

    fn push_run(&mut self, text: &str, emphasis: Option<Emphasis>) {
        if text.is_empty() {
            return;
        }
        let node = match emphasis {
            Some(emphasis) => Node::Styled(emphasis, text.to_string()),
            None => Node::Text(text.to_string()),
        };
        self.nodes.push(node);
    }

    /// Append all nodes of another tree
    pub fn extend(&mut self, other: DisplayTree) {
        self.nodes.extend(other.nodes);
    }

    /// The visible text, with breaks as `\n`
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(s) | Node::Styled(_, s) => text.push_str(s),
                Node::Break => text.push('\n'),
            }
        }
        text
    }
}

/// Render segments into a display tree
///
/// Empty styled segments are dropped. A `\n` inside a plain segment
/// becomes a [`Node::Break`].
pub fn render(segments: &[Segment<'_>]) -> DisplayTree {
    let mut tree = DisplayTree::new();
    for segment in segments {
        tree.push_text(segment.text(), segment.style().map(Emphasis::from));
    }
    tree
}

/// Render multi-line note text
///
/// Each line is tokenized and rendered on its own; lines are joined with
/// explicit breaks.
pub fn render_text(text: &str) -> DisplayTree {
    let mut tree = DisplayTree::new();
    for (i, segments) in tokenize_lines(text).enumerate() {
        if i > 0 {
            tree.push_break();
        }
        tree.extend(render(&segments));
    }
    tree
}

/// Render search match spans, marking the matched runs
pub fn render_highlight(spans: &[MatchSpan<'_>]) -> DisplayTree {
    let mut tree = DisplayTree::new();
    for span in spans {
        let emphasis = span.matched.then_some(Emphasis::Mark);
        tree.push_text(span.text, emphasis);
    }
    tree
}
