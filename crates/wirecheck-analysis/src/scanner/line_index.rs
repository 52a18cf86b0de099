//! Newline-offset index for offset → line/column conversion.

use super::types::Position;

/// Start offset of every line, computed once per file.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Position of `offset` in `source`. Offsets past the end clamp to the last line.
    pub fn position(&self, source: &str, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)];
        let column = source
            .get(line_start..offset.min(source.len()))
            .map(|prefix| prefix.chars().count())
            .unwrap_or(offset.saturating_sub(line_start));
        Position {
            line: line as u32,
            column: column as u32 + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_are_one_based() {
        let source = "module A\n\nfoo = 1\n";
        let index = LineIndex::new(source);
        assert_eq!(index.position(source, 0), Position { line: 1, column: 1 });
        assert_eq!(index.position(source, 7), Position { line: 1, column: 8 });
        assert_eq!(index.position(source, 9), Position { line: 2, column: 1 });
        assert_eq!(index.position(source, 14), Position { line: 3, column: 5 });
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "x = \"é\" ++ y";
        let index = LineIndex::new(source);
        // 'y' sits after a two-byte character
        let y = source.find('y').unwrap();
        assert_eq!(index.position(source, y).column, 12);
    }
}
