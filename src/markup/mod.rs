//! Inline note markup
//!
//! Recognized markers, highest precedence first:
//! - `#r(...)`, `#b(...)`, `#g(...)`, `#y(...)` colored span
//! - `**...**` and `*...*` bold
//! - `_..._` italic (not inside identifiers like `snake_case`)
//! - `~...~` strikethrough
//!
//! There is no nesting and no escaping. Markers never span lines.

mod projector;
mod rules;
mod style;
mod tokenizer;

pub use projector::project;
pub use rules::{MarkerMatch, Markers, Rule};
pub use style::{ColorVariant, Rgb, Segment, Style};
pub use tokenizer::{tokenize, tokenize_lines};
