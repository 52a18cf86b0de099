//! Single-pass classification of comment and literal ranges.

use super::types::{CommentRange, LiteralKind, LiteralRange};

const BLOCK_OPEN: &[u8] = b"{-";
const BLOCK_CLOSE: &[u8] = b"-}";
const LINE_OPEN: &[u8] = b"--";
const TRIPLE_QUOTE: &[u8] = b"\"\"\"";

/// Comment and literal ranges of one file, both sorted by start offset.
#[derive(Debug, Clone, Default)]
pub struct SourceRanges {
    pub comments: Vec<CommentRange>,
    pub literals: Vec<LiteralRange>,
    /// Start of a block comment that never closed; it runs to end of file.
    pub unterminated_comment: Option<usize>,
}

/// Walk `source` once, tracking nested block-comment depth.
///
/// A block range is opened on the 0→1 depth transition and closed on 1→0.
/// Line comments and literals are only recognized at depth 0. A line comment
/// excludes its terminating newline.
pub fn collect_ranges(source: &str) -> SourceRanges {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut ranges = SourceRanges::default();
    let mut depth = 0u32;
    let mut block_start = 0usize;
    let mut i = 0usize;

    while i < len {
        let rest = &bytes[i..];
        if rest.starts_with(BLOCK_OPEN) {
            if depth == 0 {
                block_start = i;
            }
            depth += 1;
            i += BLOCK_OPEN.len();
            continue;
        }
        if depth > 0 {
            if rest.starts_with(BLOCK_CLOSE) {
                depth -= 1;
                i += BLOCK_CLOSE.len();
                if depth == 0 {
                    ranges.comments.push(CommentRange {
                        from: block_start,
                        to: i - 1,
                    });
                }
            } else {
                i += 1;
            }
            continue;
        }
        if rest.starts_with(LINE_OPEN) {
            let to = find_byte(bytes, i + LINE_OPEN.len(), b'\n').map_or(len - 1, |nl| nl - 1);
            ranges.comments.push(CommentRange { from: i, to });
            i = to + 1;
            continue;
        }
        match bytes[i] {
            b'"' => {
                let to = string_end(bytes, i);
                ranges.literals.push(LiteralRange {
                    from: i,
                    to,
                    kind: LiteralKind::String,
                });
                i = to + 1;
            }
            b'\'' => {
                let to = quoted_end(bytes, i, b'\'');
                ranges.literals.push(LiteralRange {
                    from: i,
                    to,
                    kind: LiteralKind::Char,
                });
                i = to + 1;
            }
            _ => i += 1,
        }
    }

    if depth > 0 {
        ranges.comments.push(CommentRange {
            from: block_start,
            to: len - 1,
        });
        ranges.unterminated_comment = Some(block_start);
    }

    ranges
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|p| from + p)
}

/// Inclusive end of the string literal opening at `start`.
fn string_end(bytes: &[u8], start: usize) -> usize {
    if !bytes[start..].starts_with(TRIPLE_QUOTE) {
        return quoted_end(bytes, start, b'"');
    }
    let mut i = start + TRIPLE_QUOTE.len();
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i..].starts_with(TRIPLE_QUOTE) {
            return i + TRIPLE_QUOTE.len() - 1;
        } else {
            i += 1;
        }
    }
    bytes.len() - 1
}

/// Inclusive end of a single-line quoted literal. An unterminated literal
/// stops before the end of its line.
fn quoted_end(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i - 1,
            b if b == quote => return i,
            _ => i += 1,
        }
    }
    bytes.len() - 1
}
