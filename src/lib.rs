//! notemark - inline markup for plain-text notes
//!
//! Notes are stored as plain text with lightweight inline markers
//! (`**bold**`, `*bold*`, `_italic_`, `~strike~`, `#r(red)`). This crate:
//! - tokenizes marked-up text into styled segments ([`markup::tokenize`])
//! - projects it to the plain text users actually see ([`markup::project`])
//! - renders segments into a display tree ([`render::render_text`])
//! - highlights search matches in projected text ([`search::highlight`])
//!
//! All of these are pure and infallible; malformed markup degrades to
//! literal text.

pub mod config;
pub mod error;
pub mod markup;
pub mod render;
pub mod search;

pub use error::{NotemarkError, Result};
