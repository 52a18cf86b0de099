//! `exposing (...)` lists and top-level list splitting.

use super::types::{ExposedItem, ExposingList};
use crate::scanner::{SourceScanner, DEFAULT_DELIMITERS};

const EXPOSING: &str = "exposing";

/// Parse the exposing list of a module or import header.
///
/// `scanner` covers the header's own code. Returns `None` when the header
/// has no `exposing` clause or the list is unbalanced.
pub fn parse_exposing(scanner: &SourceScanner<'_>) -> Option<ExposingList> {
    let mut cursor = 0;
    let keyword = loop {
        let word = scanner.word_at(cursor, true, DEFAULT_DELIMITERS)?;
        if word.text == EXPOSING || word.text.starts_with("exposing(") {
            break word;
        }
        cursor = word.next_index;
    };

    let open = scanner.char_index(keyword.start + EXPOSING.len(), b'(', false)?;
    let close = scanner.matching_close(open, "(", ")", false)?;
    let items = split_top_level(scanner, open + 1, close, ",");

    if items.iter().any(|item| item == "..") {
        return Some(ExposingList::All);
    }
    Some(ExposingList::Items(
        items.iter().filter_map(|item| parse_item(item)).collect(),
    ))
}

fn parse_item(item: &str) -> Option<ExposedItem> {
    if item.is_empty() {
        return None;
    }
    if let Some(operator) = item.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        return Some(ExposedItem::Value(operator.trim().to_string()));
    }
    if let Some((name, _)) = item.split_once('(') {
        return Some(ExposedItem::TypeWithConstructors(name.trim().to_string()));
    }
    if item.starts_with(|c: char| c.is_uppercase()) {
        Some(ExposedItem::OpaqueType(item.to_string()))
    } else {
        Some(ExposedItem::Value(item.to_string()))
    }
}

/// Split `[from, to)` on `separator` at bracket depth zero.
///
/// Comments are dropped and literals kept intact. Each piece is trimmed;
/// empty pieces are kept so callers can tell `a,,b` apart.
pub(crate) fn split_top_level(scanner: &SourceScanner<'_>, from: usize, to: usize, separator: &str) -> Vec<String> {
    let source = scanner.source();
    let bytes = source.as_bytes();
    let to = to.min(bytes.len());

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut segment_start = from;
    let mut i = from;

    while i < to {
        if let Some(comment) = scanner.comment_at(i) {
            current.push_str(&source[segment_start..i]);
            current.push(' ');
            i = comment.to + 1;
            segment_start = i;
            continue;
        }
        if let Some(literal) = scanner.literal_at(i) {
            i = literal.to + 1;
            continue;
        }
        if depth == 0 && bytes[i..to].starts_with(separator.as_bytes()) {
            current.push_str(&source[segment_start..i]);
            pieces.push(current.trim().to_string());
            current.clear();
            i += separator.len();
            segment_start = i;
            continue;
        }
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        i += 1;
    }
    if segment_start < to {
        current.push_str(&source[segment_start..to]);
    }
    pieces.push(current.trim().to_string());
    pieces
}
