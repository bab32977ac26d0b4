//! List previews of notes with search highlighting
//!
//! Matching runs on the full projected text. The matched spans are then
//! laid out (word-wrapped and clamped), so a match that crosses a wrap
//! point stays marked on every line it lands on.

use unicode_width::UnicodeWidthChar;

use super::highlight::{Highlighter, MatchSpan};
use super::note::Note;
use crate::config::Config;
use crate::markup::project;
use crate::render::{render_highlight, DisplayTree, Emphasis};

/// Layout limits for a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Maximum display columns per line
    pub max_width: usize,
    /// Maximum number of excerpt lines
    pub max_lines: usize,
    /// Tags shown before collapsing the rest into `+N`
    pub visible_tags: usize,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_width: 80,
            max_lines: 2,
            visible_tags: 2,
        }
    }
}

impl From<&Config> for PreviewOptions {
    fn from(config: &Config) -> Self {
        Self {
            max_width: config.preview_width,
            max_lines: config.preview_lines,
            visible_tags: config.visible_tags,
        }
    }
}

/// Compact, plain-text view of a note for search listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePreview {
    /// Projected title
    title: String,
    /// Projected content, empty when the note has none
    content: String,
    /// The first few projected tags
    pub tags: Vec<String>,
    /// Number of tags not shown
    pub hidden_tags: usize,
    width: usize,
    max_lines: usize,
}

impl NotePreview {
    pub fn new(note: &Note, options: &PreviewOptions) -> Self {
        let tags: Vec<String> = note
            .tags
            .iter()
            .take(options.visible_tags)
            .map(|t| project(t))
            .collect();
        let hidden_tags = note.tags.len().saturating_sub(tags.len());

        Self {
            title: project(&note.title),
            content: note.content.as_deref().map(project).unwrap_or_default(),
            tags,
            hidden_tags,
            width: options.max_width.max(1),
            max_lines: options.max_lines,
        }
    }

    /// The title, clamped to one line
    pub fn title_line(&self) -> String {
        let spans = [MatchSpan::unmatched(&self.title)];
        layout(&spans, self.width, 1)
            .first()
            .map(|line| cells_to_string(line))
            .unwrap_or_default()
    }

    /// The content, whitespace-collapsed, wrapped and clamped
    pub fn excerpt(&self) -> Vec<String> {
        let spans = [MatchSpan::unmatched(&self.content)];
        layout(&spans, self.width, self.max_lines)
            .iter()
            .map(|line| cells_to_string(line))
            .collect()
    }

    /// Render title, excerpt and tags on separate lines, marking matches
    pub fn render(&self, highlighter: &Highlighter) -> DisplayTree {
        let mut tree = DisplayTree::new();
        let title = layout(&highlighter.highlight(&self.title), self.width, 1);
        if let Some(line) = title.first() {
            push_cells(&mut tree, line);
        }

        for line in layout(&highlighter.highlight(&self.content), self.width, self.max_lines) {
            tree.push_break();
            push_cells(&mut tree, &line);
        }

        if !self.tags.is_empty() || self.hidden_tags > 0 {
            tree.push_break();
            for (i, tag) in self.tags.iter().enumerate() {
                if i > 0 {
                    tree.push_text("  ", None);
                }
                tree.extend(render_highlight(&highlighter.highlight(tag)));
            }
            if self.hidden_tags > 0 {
                if !self.tags.is_empty() {
                    tree.push_text("  ", None);
                }
                tree.push_text(&format!("+{}", self.hidden_tags), None);
            }
        }

        tree
    }
}

/// A laid-out character and whether it lies inside a match
type Cell = (char, bool);

enum Token {
    Word(Vec<Cell>),
    Space(Vec<Cell>),
}

/// Split highlighted text into words and the whitespace between them
///
/// Unmatched whitespace collapses to one space. Whitespace inside a match
/// is kept, one marked space per character.
fn tokens(spans: &[MatchSpan<'_>]) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = Vec::new();
    let mut space: Option<Vec<Cell>> = None;

    for span in spans {
        for ch in span.text.chars() {
            if !ch.is_whitespace() {
                if let Some(cells) = space.take() {
                    tokens.push(Token::Space(cells));
                }
                word.push((ch, span.matched));
                continue;
            }
            if !word.is_empty() {
                tokens.push(Token::Word(std::mem::take(&mut word)));
            }
            let cells = space.get_or_insert_with(Vec::new);
            if span.matched {
                cells.push((' ', true));
            }
        }
    }

    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    for token in &mut tokens {
        if let Token::Space(cells) = token {
            if cells.is_empty() {
                cells.push((' ', false));
            }
        }
    }
    tokens
}

fn cells_width(cells: &[Cell]) -> usize {
    cells.iter().map(|(ch, _)| ch.width().unwrap_or(0)).sum()
}

/// Word-wrap highlighted text to `width` columns, keeping at most `max_lines`
///
/// Words wider than a line are split by character. Leading and trailing
/// whitespace of a line is dropped. When lines are dropped, the last kept
/// line ends with an ellipsis.
fn layout(spans: &[MatchSpan<'_>], width: usize, max_lines: usize) -> Vec<Vec<Cell>> {
    let mut lines = Vec::new();
    let mut line: Vec<Cell> = Vec::new();
    let mut line_width = 0;
    let mut pending: Option<Vec<Cell>> = None;

    for token in tokens(spans) {
        let word = match token {
            Token::Space(cells) => {
                if !line.is_empty() {
                    pending = Some(cells);
                }
                continue;
            }
            Token::Word(cells) => cells,
        };

        let word_width = cells_width(&word);
        let space = pending.take().unwrap_or_default();
        let space_width = cells_width(&space);
        if !line.is_empty() && line_width + space_width + word_width <= width {
            line.extend(space);
            line.extend(word);
            line_width += space_width + word_width;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        for cell in word {
            let cell_width = cell.0.width().unwrap_or(0);
            if !line.is_empty() && line_width + cell_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(cell);
            line_width += cell_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            ellipsize(last, width);
        }
    }
    lines
}

fn ellipsize(line: &mut Vec<Cell>, width: usize) {
    while !line.is_empty() && cells_width(line) + 1 > width {
        line.pop();
    }
    while line.last().is_some_and(|(ch, _)| ch.is_whitespace()) {
        line.pop();
    }
    line.push(('…', false));
}

fn cells_to_string(cells: &[Cell]) -> String {
    cells.iter().map(|(ch, _)| ch).collect()
}

/// Append a laid-out line, grouping cells into marked and unmarked runs
fn push_cells(tree: &mut DisplayTree, cells: &[Cell]) {
    let mut run = String::new();
    let mut marked = false;
    for &(ch, is_marked) in cells {
        if is_marked != marked && !run.is_empty() {
            tree.push_text(&run, marked.then_some(Emphasis::Mark));
            run.clear();
        }
        marked = is_marked;
        run.push(ch);
    }
    tree.push_text(&run, marked.then_some(Emphasis::Mark));
}
