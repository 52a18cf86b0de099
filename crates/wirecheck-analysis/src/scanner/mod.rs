//! Comment-aware source scanner.
//!
//! Classifies byte ranges of one source file as comments or literals in a
//! single forward pass, then answers word, character, and bracket queries
//! that can see or skip those ranges. Everything above the scanner
//! (tokenizer, declaration parser) reads source exclusively through it.

mod line_index;
mod ranges;
mod source;
mod types;

pub use line_index::LineIndex;
pub use ranges::{collect_ranges, SourceRanges};
pub use source::{SourceScanner, DEFAULT_DELIMITERS};
pub use types::{CommentRange, LiteralKind, LiteralRange, Position, TextRange, Word};
