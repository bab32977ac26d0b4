//! Configuration file support
//!
//! Loads settings from ~/.notemark.toml (or %USERPROFILE%\.notemark.toml on Windows)
//!
//! Example:
//! ```text
//! # notemark configuration
//! color = true
//! preview-width = 60
//! preview-lines = 2
//! visible-tags = 3
//! ```
//!
//! The color palette of `#x(...)` spans is fixed and not configurable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::Result;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether to write ANSI styling to the terminal
    pub color: bool,
    /// Preview line width in display columns
    pub preview_width: usize,
    /// Maximum excerpt lines in a preview
    pub preview_lines: usize,
    /// Tags shown in a preview before collapsing into `+N`
    pub visible_tags: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            preview_width: 80,
            preview_lines: 2,
            visible_tags: 2,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".notemark.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".notemark.toml"))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table);
        Ok(config)
    }

    /// Apply settings from a parsed table
    fn apply(&mut self, table: &Table) {
        for (key, value) in table {
            match key.as_str() {
                "color" => match value.as_bool() {
                    Some(b) => self.color = b,
                    None => warn!(key = %key, "expected a boolean, ignoring"),
                },
                "preview-width" => {
                    if let Some(n) = parse_count(key, value) {
                        self.preview_width = n.clamp(10, 400);
                    }
                }
                "preview-lines" => {
                    if let Some(n) = parse_count(key, value) {
                        self.preview_lines = n.clamp(1, 20);
                    }
                }
                "visible-tags" => {
                    if let Some(n) = parse_count(key, value) {
                        self.visible_tags = n.min(20);
                    }
                }
                _ => debug!(key = %key, "unknown config key"),
            }
        }
    }
}

/// Read a non-negative integer setting
fn parse_count(key: &str, value: &Value) -> Option<usize> {
    match value.as_integer().and_then(|n| usize::try_from(n).ok()) {
        Some(n) => Some(n),
        None => {
            warn!(key, "expected a non-negative integer, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotemarkError;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
color = false
preview-width = 60
preview-lines = 3
visible-tags = 4
        "#;

        let config = Config::parse(contents).unwrap();
        assert!(!config.color);
        assert_eq!(config.preview_width, 60);
        assert_eq!(config.preview_lines, 3);
        assert_eq!(config.visible_tags, 4);
    }

    #[test]
    fn test_clamped_values() {
        let config =
            Config::parse("preview-width = 2\npreview-lines = 99\nvisible-tags = 500").unwrap();
        assert_eq!(config.preview_width, 10);
        assert_eq!(config.preview_lines, 20);
        assert_eq!(config.visible_tags, 20);
    }

    #[test]
    fn test_wrong_types_ignored() {
        let config = Config::parse("color = \"yes\"\npreview-width = -5\nextra = 1").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::parse("color = ").unwrap_err();
        assert!(matches!(err, NotemarkError::Config(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("notemark-no-such-config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }
}
