//! Token types.

use serde::{Deserialize, Serialize};
use wirecheck_core::errors::ParseError;

use crate::scanner::{Position, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Module,
    Import,
    Port,
    Type,
    TypeAlias,
    TypedFunction,
    UntypedFunction,
    Comment,
    Whitespace,
    /// Text of a skipped malformed or unsupported declaration.
    Unparsed,
}

impl TokenKind {
    /// Trivia is tokenized for totality but discarded before parsing.
    pub fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment | Self::Whitespace | Self::Unparsed)
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::TypedFunction | Self::UntypedFunction)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::Import => "import",
            Self::Port => "port",
            Self::Type => "type",
            Self::TypeAlias => "type_alias",
            Self::TypedFunction => "typed_function",
            Self::UntypedFunction => "untyped_function",
            Self::Comment => "comment",
            Self::Whitespace => "whitespace",
            Self::Unparsed => "unparsed",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Declared name: module/import path, type, port, or function name.
    /// Empty for trivia.
    pub identifier: String,
    /// Raw source text, byte-for-byte.
    pub code: String,
    pub range: TextRange,
    pub start: Position,
    pub end: Position,
}

/// Full tokenization of one file.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    /// Every token in source order, trivia included. Together they cover the
    /// file exactly once.
    pub tokens: Vec<Token>,
    /// Non-fatal problems; the affected declarations became `Unparsed`.
    pub diagnostics: Vec<ParseError>,
}

impl TokenStream {
    /// Declaration tokens only, in source order.
    pub fn declarations(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.kind.is_trivia())
    }

    pub fn into_declarations(self) -> Vec<Token> {
        self.tokens.into_iter().filter(|t| !t.kind.is_trivia()).collect()
    }
}
