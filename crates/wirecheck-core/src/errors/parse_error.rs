//! Parser and tokenizer errors.

use super::error_code::{self, ErrorCode};

/// Errors raised while carving a source file into declarations.
///
/// `MissingModuleDeclaration` is the only variant that makes a file
/// unanalyzable. The others are collected as diagnostics while
/// tokenization carries on past the offending declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("No module declaration found in {file}")]
    MissingModuleDeclaration { file: String },

    #[error("Unbalanced '{open}' in {construct} declaration at offset {offset}")]
    UnbalancedDelimiter {
        construct: String,
        open: String,
        offset: usize,
    },

    #[error("Expected '{expected}' in {construct} declaration at offset {offset}")]
    MissingTerminator {
        construct: String,
        expected: String,
        offset: usize,
    },

    #[error("Unterminated comment starting at offset {offset}")]
    UnterminatedComment { offset: usize },
}

impl ParseError {
    /// True for the only failure that aborts a whole file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingModuleDeclaration { .. })
    }
}

impl ErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingModuleDeclaration { .. } => error_code::MISSING_MODULE,
            Self::UnbalancedDelimiter { .. } => error_code::UNBALANCED_DELIMITER,
            Self::UnterminatedComment { .. } => error_code::UNTERMINATED_COMMENT,
            Self::MissingTerminator { .. } => error_code::PARSE_ERROR,
        }
    }
}
