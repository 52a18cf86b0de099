//! SourceScanner: word, character, and bracket queries over one file.

use super::line_index::LineIndex;
use super::ranges::collect_ranges;
use super::types::{CommentRange, LiteralRange, Position, TextRange, Word};

/// Default word delimiters: whitespace.
pub const DEFAULT_DELIMITERS: &[u8] = b" \n\r\t";

/// Comment-aware view of one source file.
///
/// Built once per file; cheap to query from any offset. All offsets are
/// byte offsets into the original text.
#[derive(Debug, Clone)]
pub struct SourceScanner<'src> {
    source: &'src str,
    comments: Vec<CommentRange>,
    literals: Vec<LiteralRange>,
    unterminated_comment: Option<usize>,
    lines: LineIndex,
}

impl<'src> SourceScanner<'src> {
    pub fn new(source: &'src str) -> Self {
        let ranges = collect_ranges(source);
        if let Some(offset) = ranges.unterminated_comment {
            tracing::warn!(offset, "unterminated block comment, treating rest of file as comment");
        }
        Self {
            source,
            comments: ranges.comments,
            literals: ranges.literals,
            unterminated_comment: ranges.unterminated_comment,
            lines: LineIndex::new(source),
        }
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    pub fn comment_ranges(&self) -> &[CommentRange] {
        &self.comments
    }

    pub fn literal_ranges(&self) -> &[LiteralRange] {
        &self.literals
    }

    pub fn unterminated_comment(&self) -> Option<usize> {
        self.unterminated_comment
    }

    /// The comment range covering `index`, if any.
    pub fn comment_at(&self, index: usize) -> Option<CommentRange> {
        let p = self.comments.partition_point(|r| r.from <= index);
        self.comments[..p].last().copied().filter(|r| r.contains(index))
    }

    /// The string/char literal covering `index`, if any.
    pub fn literal_at(&self, index: usize) -> Option<LiteralRange> {
        let p = self.literals.partition_point(|r| r.from <= index);
        self.literals[..p].last().copied().filter(|r| r.contains(index))
    }

    /// First literal that starts inside `(start, end)`.
    pub fn literal_starting_within(&self, start: usize, end: usize) -> Option<LiteralRange> {
        let p = self.literals.partition_point(|r| r.from <= start);
        self.literals.get(p).copied().filter(|r| r.from < end)
    }

    pub fn position(&self, offset: usize) -> Position {
        self.lines.position(self.source, offset)
    }

    pub fn slice(&self, range: TextRange) -> &'src str {
        self.source.get(range.start..range.end).unwrap_or("")
    }

    /// Next word at or after `index`.
    ///
    /// Leading delimiters are skipped. With `skip_comments`, any index inside
    /// a comment jumps to just past that comment, and a word stops where a
    /// comment begins, so comments between tokens are invisible.
    pub fn word_at(&self, index: usize, skip_comments: bool, delimiters: &[u8]) -> Option<Word<'src>> {
        let bytes = self.source.as_bytes();
        let len = bytes.len();
        let mut i = index;
        while i < len {
            if skip_comments {
                if let Some(comment) = self.comment_at(i) {
                    i = comment.to + 1;
                    continue;
                }
            }
            if delimiters.contains(&bytes[i]) {
                i += 1;
                continue;
            }
            break;
        }
        if i >= len {
            return None;
        }

        let start = i;
        let stop = if skip_comments {
            self.next_comment_start(start).unwrap_or(len)
        } else {
            len
        };
        while i < stop && !delimiters.contains(&bytes[i]) {
            i += 1;
        }
        let text = self.source.get(start..i)?;
        Some(Word {
            text,
            start,
            next_index: i,
        })
    }

    /// Index of the first `ch` at or after `start`.
    pub fn char_index(&self, start: usize, ch: u8, include_comments: bool) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let mut i = start;
        while i < bytes.len() {
            if !include_comments {
                if let Some(comment) = self.comment_at(i) {
                    i = comment.to + 1;
                    continue;
                }
            }
            if bytes[i] == ch {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Index of the first `ch` in `[start, end)` that is real code: outside
    /// comments and outside string/char literals.
    pub fn code_char_index(&self, start: usize, end: usize, ch: u8) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let end = end.min(bytes.len());
        let mut i = start;
        while i < end {
            if let Some(comment) = self.comment_at(i) {
                i = comment.to + 1;
                continue;
            }
            if let Some(literal) = self.literal_at(i) {
                i = literal.to + 1;
                continue;
            }
            if bytes[i] == ch {
                return Some(i);
            }
            i += 1;
        }
        None
    }

    /// Index of the `close` that balances the first `open` at or after `start`.
    ///
    /// Nesting depth is tracked for arbitrary token pairs. Literals never
    /// count; comments count only with `include_comments`. Returns `None`
    /// when the file ends unbalanced.
    pub fn matching_close(&self, start: usize, open: &str, close: &str, include_comments: bool) -> Option<usize> {
        let bytes = self.source.as_bytes();
        let (open, close) = (open.as_bytes(), close.as_bytes());
        let mut depth = 0usize;
        let mut i = start;
        while i < bytes.len() {
            if !include_comments {
                if let Some(comment) = self.comment_at(i) {
                    i = comment.to + 1;
                    continue;
                }
            }
            if let Some(literal) = self.literal_at(i) {
                i = literal.to + 1;
                continue;
            }
            let rest = &bytes[i..];
            if rest.starts_with(open) {
                depth += 1;
                i += open.len();
            } else if rest.starts_with(close) {
                match depth {
                    0 => {}
                    1 => return Some(i),
                    _ => depth -= 1,
                }
                i += close.len();
            } else {
                i += 1;
            }
        }
        None
    }

    /// Offset just past the comment that `word` opens; `word.next_index`
    /// when the word is not a comment.
    pub fn comment_end(&self, word: &Word<'_>) -> usize {
        self.comment_at(word.start)
            .map_or(word.next_index, |comment| comment.to + 1)
    }

    /// End of the top-level declaration containing `from`.
    ///
    /// Advances to the first newline whose next character is neither a
    /// newline nor leading whitespace, i.e. where the next line starts a new
    /// declaration at column 0. Newlines inside comments and multi-line
    /// strings never end a block. Trailing whitespace is excluded. Runs to
    /// end of file when no such newline exists.
    pub fn end_of_block(&self, from: usize) -> usize {
        let bytes = self.source.as_bytes();
        let mut i = from;
        let end = loop {
            let Some(newline) = self.code_char_index(i, bytes.len(), b'\n') else {
                break bytes.len();
            };
            match bytes.get(newline + 1) {
                Some(b'\n' | b'\r' | b' ' | b'\t') => i = newline + 1,
                _ => break newline,
            }
        };
        self.trim_end(from, end)
    }

    /// Move `end` back over trailing whitespace, never before `floor` and
    /// never into a comment or literal.
    pub fn trim_end(&self, floor: usize, mut end: usize) -> usize {
        let bytes = self.source.as_bytes();
        while end > floor
            && bytes[end - 1].is_ascii_whitespace()
            && self.comment_at(end - 1).is_none()
            && self.literal_at(end - 1).is_none()
        {
            end -= 1;
        }
        end
    }

    fn next_comment_start(&self, index: usize) -> Option<usize> {
        let p = self.comments.partition_point(|r| r.from < index);
        self.comments.get(p).map(|r| r.from)
    }
}
