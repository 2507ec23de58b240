//! Block-level rendering for Markdown.
//!
//! The block renderer is line-oriented and handles:
//! - Fenced code blocks
//! - Thematic breaks
//! - Blockquotes
//! - ATX headings
//! - Ordered and unordered lists
//! - Paragraphs

mod line;
mod parser;

pub use line::{classify, fence_lang, Line};
pub use parser::{BlockRenderer, ListKind};
