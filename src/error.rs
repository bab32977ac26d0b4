//! Error types for notemark
//!
//! Markup, rendering and highlighting never fail; these errors only come
//! from the surfaces that touch the outside world (files, config, CLI).

use thiserror::Error;

/// Result type alias for notemark operations
pub type Result<T> = std::result::Result<T, NotemarkError>;

/// Notemark error types
#[derive(Error, Debug)]
pub enum NotemarkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid note {path}: {reason}")]
    InvalidNote { path: String, reason: String },

    #[error("{0}")]
    Usage(String),
}
