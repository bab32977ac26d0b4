//! Notes as supplied by the listing layer, and query filtering

use std::fs;
use std::path::Path;

use tracing::debug;

use super::highlight::Highlighter;
use crate::error::{NotemarkError, Result};
use crate::markup::project;

/// A note record: raw marked-up title, content and tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
}

impl Note {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }

    /// Builder: set content
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Builder: set tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the note's visible text contains the query
    ///
    /// Title, content and tags are projected first, so marker syntax
    /// never takes part in matching.
    pub fn matches(&self, highlighter: &Highlighter) -> bool {
        if highlighter.is_empty() {
            return true;
        }
        highlighter.is_match(&project(&self.title))
            || self
                .content
                .as_deref()
                .is_some_and(|c| highlighter.is_match(&project(c)))
            || self.tags.iter().any(|t| highlighter.is_match(&project(t)))
    }

    /// Load a note from disk
    ///
    /// `.toml` files carry `title`, `content` and `tags` keys. Any other
    /// file is taken as content, titled by its file stem.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        let note = if is_toml {
            Self::from_toml(&contents, &path.display().to_string())?
        } else {
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            Note::new(title).with_content(&contents)
        };
        debug!(path = %path.display(), title = %note.title, "loaded note");
        Ok(note)
    }

    /// Parse a TOML note
    pub fn from_toml(contents: &str, origin: &str) -> Result<Self> {
        let invalid = |reason: String| NotemarkError::InvalidNote {
            path: origin.to_string(),
            reason,
        };

        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| invalid(e.to_string()))?;

        let title = table
            .get("title")
            .and_then(|v| v.as_str())
            .ok_or_else(|| invalid("missing string key `title`".to_string()))?;

        let content = match table.get("content") {
            None => None,
            Some(value) => Some(
                value
                    .as_str()
                    .ok_or_else(|| invalid("`content` must be a string".to_string()))?
                    .to_string(),
            ),
        };

        let tags = match table.get("tags") {
            None => Vec::new(),
            Some(value) => value
                .as_array()
                .ok_or_else(|| invalid("`tags` must be an array".to_string()))?
                .iter()
                .map(|t| {
                    t.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| invalid("`tags` entries must be strings".to_string()))
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(Self {
            title: title.to_string(),
            content,
            tags,
        })
    }
}

/// Keep the notes matching `query`, in their original order
///
/// An empty query keeps every note.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let highlighter = Highlighter::new(query);
    let kept: Vec<_> = notes.iter().filter(|n| n.matches(&highlighter)).collect();
    debug!(query, kept = kept.len(), total = notes.len(), "filtered notes");
    kept
}
