//! Search over note text
//!
//! Queries always run against the plain-text projection, so users find
//! what they see rather than the marker syntax:
//! - `highlight` splits text into matched / unmatched spans
//! - `note` filters note listings by query
//! - `preview` builds clamped, highlighted list previews

mod highlight;
mod note;
mod preview;

pub use highlight::{highlight, Highlighter, MatchSpan};
pub use note::{filter_notes, Note};
pub use preview::{NotePreview, PreviewOptions};
