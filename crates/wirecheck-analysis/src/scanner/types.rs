//! Scanner types: ranges, positions, words.

use serde::{Deserialize, Serialize};

/// 1-based line/column position. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// Half-open byte range `[start, end)` into the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Inclusive byte range `[from, to]` of one comment. Ranges never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentRange {
    pub from: usize,
    pub to: usize,
}

impl CommentRange {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.from && index <= self.to
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    String,
    Char,
}

/// Inclusive byte range `[from, to]` of a string or char literal, quotes included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiteralRange {
    pub from: usize,
    pub to: usize,
    pub kind: LiteralKind,
}

impl LiteralRange {
    pub fn contains(&self, index: usize) -> bool {
        index >= self.from && index <= self.to
    }
}

/// A word found by `SourceScanner::word_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'src> {
    pub text: &'src str,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the word; where the next lookup should begin.
    pub next_index: usize,
}
