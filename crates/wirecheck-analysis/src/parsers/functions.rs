//! Function declarations: signature, parameters, and body references.

use wirecheck_core::types::collections::{FxHashMap, FxHashSet, Occurrences};
use wirecheck_core::types::identifiers::SymbolId;

use super::exposing::split_top_level;
use super::types::Dependency;
use crate::resolver::SymbolResolver;
use crate::scanner::{SourceScanner, TextRange, Word};

/// Word delimiters inside a function declaration.
pub const FUNCTION_DELIMITERS: &[u8] = b" \n\r\t=(){},[]";

/// Reserved words never recorded as references.
pub const RESERVED_WORDS: &[&str] = &[
    "if", "then", "else", "case", "of", "let", "in", "type", "alias", "module",
    "import", "exposing", "as", "port", "where", "infix", "effect",
];

const EQUALITY: &str = "==";

/// Syntax that survives word splitting but names nothing.
const SYNTAX_WORDS: &[&str] = &["->", "|", "\\", ":", "..", "_", "::"];

/// Where the pieces of one function declaration sit in its own code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FunctionLayout {
    /// Text between the signature's `:` and the definition line.
    pub signature: Option<TextRange>,
    /// The name word that opens the definition line.
    pub definition: usize,
    pub definition_end: usize,
    /// The definition's `=`; `None` for a bare signature.
    pub equals: Option<usize>,
}

/// Lay out a typed declaration (`name : sig` then `name args = body`).
///
/// The declaration's code starts with `name`.
///
/// Returns `None` when the name never reappears at the start of a line,
/// i.e. the declaration is a signature with no definition after it.
pub(crate) fn typed_layout(scanner: &SourceScanner<'_>, name: &str) -> Option<FunctionLayout> {
    let colon = scanner.code_char_index(name.len(), scanner.len(), b':')?;
    let definition = words_from(scanner, colon + 1, FUNCTION_DELIMITERS)
        .find(|w| w.text == name && starts_line(scanner, w.start))?;
    Some(FunctionLayout {
        signature: Some(TextRange::new(colon + 1, definition.start)),
        definition: definition.start,
        definition_end: definition.next_index,
        equals: scanner.code_char_index(definition.next_index, scanner.len(), b'='),
    })
}

/// Lay out an untyped declaration (`name args = body`).
pub(crate) fn untyped_layout(scanner: &SourceScanner<'_>) -> Option<FunctionLayout> {
    let head = scanner.word_at(0, true, FUNCTION_DELIMITERS)?;
    Some(FunctionLayout {
        signature: None,
        definition: head.start,
        definition_end: head.next_index,
        equals: scanner.code_char_index(head.next_index, scanner.len(), b'='),
    })
}

/// Declared return type: the first word after the last top-level `:` of
/// the signature.
///
/// Type variables, tuples, records and unit have no symbol.
pub(crate) fn return_type(
    scanner: &SourceScanner<'_>,
    signature: TextRange,
    resolver: &mut SymbolResolver<'_>,
) -> Option<SymbolId> {
    let segments = split_top_level(scanner, signature.start, signature.end, ":");
    let last = segments.last()?;
    let head: String = last
        .chars()
        .take_while(|&c| c.is_alphanumeric() || c == '_' || c == '.')
        .collect();
    if !head.starts_with(|c: char| c.is_uppercase()) {
        return None;
    }
    if head.contains('.') {
        resolver.resolve_qualified(&head)
    } else {
        Some(resolver.resolve(&head, None, None))
    }
}

/// Parameter names between the definition's name and its `=`.
///
/// Names bound by tuple, record, cons and constructor patterns are included
/// in order; constructors, literals and `as` are not. A wildcard parameter
/// is kept as `_` so arity survives.
pub(crate) fn arguments(scanner: &SourceScanner<'_>, layout: &FunctionLayout) -> Vec<String> {
    let Some(equals) = layout.equals else {
        return Vec::new();
    };
    let mut names = Vec::new();
    for word in words_from(scanner, layout.definition_end, FUNCTION_DELIMITERS) {
        if word.start >= equals {
            break;
        }
        if scanner.literal_at(word.start).is_some() {
            continue;
        }
        for part in word.text.split("::").filter(|p| !p.is_empty()) {
            if part == "_" || is_binding_name(part) {
                names.push(part.to_string());
            }
        }
    }
    names
}

/// Every symbol referenced in the body after `equals`, deduplicated by
/// symbol with each occurrence recorded as `base + offset`.
///
/// Record field names and let-bound names (`name =`) are not references.
/// Operators that contain `=` are, even though `=` is a delimiter.
pub(crate) fn body_dependencies(
    scanner: &SourceScanner<'_>,
    equals: usize,
    base: usize,
    arguments: &[String],
    resolver: &mut SymbolResolver<'_>,
) -> Vec<Dependency> {
    let bound: FxHashSet<&str> = arguments.iter().map(String::as_str).collect();
    let mut collector = DependencyCollector::default();
    let mut cursor = equals + 1;

    while let Some(word) = scanner.word_at(cursor, true, FUNCTION_DELIMITERS) {
        for offset in equality_operators(scanner, cursor, word.start) {
            if let Some(id) = resolve_reference(EQUALITY, &bound, resolver) {
                collector.record(id, base + offset);
            }
        }
        if let Some(literal) = scanner.literal_at(word.start) {
            cursor = literal.to + 1;
            continue;
        }
        // A literal glued to the word (`f"x"`) ends it.
        let (text, next) = match scanner.literal_starting_within(word.start, word.next_index) {
            Some(literal) => (&word.text[..literal.from - word.start], literal.from),
            None => glue_equals(scanner.source(), word),
        };
        cursor = next;

        if is_binding_name(text) && binds_name(scanner, next) {
            continue;
        }
        if let Some(id) = resolve_reference(text, &bound, resolver) {
            collector.record(id, base + word.start);
        }
    }
    collector.finish()
}

fn resolve_reference(text: &str, bound: &FxHashSet<&str>, resolver: &mut SymbolResolver<'_>) -> Option<SymbolId> {
    if !is_reference(text) {
        return None;
    }
    let Some((head, _)) = text.split_once('.') else {
        if bound.contains(text) {
            return None;
        }
        return Some(resolver.resolve(text, None, None));
    };

    if !head.starts_with(|c: char| c.is_uppercase()) {
        // Record field access: only the record itself is a reference.
        if head.is_empty() || bound.contains(head) {
            return None;
        }
        return Some(resolver.resolve(head, None, None));
    }

    // `Module.value.field`: cut after the first lower-case segment.
    let mut end = 0;
    for segment in text.split('.') {
        end += segment.len();
        if !segment.starts_with(|c: char| c.is_uppercase()) {
            break;
        }
        end += 1;
    }
    resolver.resolve_qualified(&text[..end.min(text.len())])
}

fn is_reference(text: &str) -> bool {
    if text.is_empty()
        || text.starts_with('.')
        || text.starts_with('\\')
        || SYNTAX_WORDS.contains(&text)
        || RESERVED_WORDS.contains(&text)
    {
        return false;
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), _) if c.is_ascii_digit() => false,
        (Some('-'), Some(c)) if c.is_ascii_digit() => false,
        _ => true,
    }
}

/// Operator words lose their trailing `=` to the delimiters (`>=`, `/=`).
fn glue_equals<'src>(source: &'src str, word: Word<'src>) -> (&'src str, usize) {
    if !word.text.chars().all(is_operator_char) {
        return (word.text, word.next_index);
    }
    let bytes = source.as_bytes();
    let mut end = word.next_index;
    while bytes.get(end) == Some(&b'=') {
        end += 1;
    }
    (source.get(word.start..end).unwrap_or(word.text), end)
}

/// Offsets of `==` between two words. It is made of delimiters only, so it
/// never surfaces as a word.
fn equality_operators(scanner: &SourceScanner<'_>, from: usize, to: usize) -> Vec<usize> {
    let bytes = scanner.source().as_bytes();
    let mut found = Vec::new();
    let mut i = from;
    while i + 1 < to {
        if let Some(comment) = scanner.comment_at(i) {
            i = comment.to + 1;
            continue;
        }
        if bytes[i] == b'=' && bytes[i + 1] == b'=' {
            found.push(i);
            i += 2;
        } else {
            i += 1;
        }
    }
    found
}

fn is_operator_char(c: char) -> bool {
    "+-*/<>&|^!?%.:$~#@".contains(c)
}

/// A word followed by a lone `=` names a record field or a let binding.
fn binds_name(scanner: &SourceScanner<'_>, after: usize) -> bool {
    let bytes = scanner.source().as_bytes();
    let mut i = after;
    while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
        i += 1;
    }
    bytes.get(i) == Some(&b'=') && bytes.get(i + 1) != Some(&b'=')
}

fn is_binding_name(text: &str) -> bool {
    text.starts_with(|c: char| c.is_lowercase() || c == '_')
        && text != "as"
        && text.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn starts_line(scanner: &SourceScanner<'_>, index: usize) -> bool {
    index == 0 || scanner.source().as_bytes().get(index - 1) == Some(&b'\n')
}

fn words_from<'s, 'src>(
    scanner: &'s SourceScanner<'src>,
    from: usize,
    delimiters: &'s [u8],
) -> impl Iterator<Item = Word<'src>> + 's {
    let mut cursor = from;
    std::iter::from_fn(move || {
        let word = scanner.word_at(cursor, true, delimiters)?;
        cursor = word.next_index;
        Some(word)
    })
}

/// Merges repeated references into one `Dependency` per symbol.
#[derive(Default)]
struct DependencyCollector {
    dependencies: Vec<Dependency>,
    index: FxHashMap<SymbolId, usize>,
}

impl DependencyCollector {
    fn record(&mut self, symbol: SymbolId, offset: usize) {
        match self.index.get(&symbol) {
            Some(&i) => self.dependencies[i].occurrences.push(offset),
            None => {
                self.index.insert(symbol, self.dependencies.len());
                let mut occurrences = Occurrences::new();
                occurrences.push(offset);
                self.dependencies.push(Dependency { symbol, occurrences });
            }
        }
    }

    fn finish(self) -> Vec<Dependency> {
        self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ModuleCatalogue;

    #[test]
    fn reference_filter() {
        for skipped in ["", ".name", "\\x", "->", "_", "..", "42", "-1", "3.14", "case", "of"] {
            assert!(!is_reference(skipped), "{skipped:?} should not be a reference");
        }
        for kept in ["foo", "Just", "List.map", "|>", "-", "model.count"] {
            assert!(is_reference(kept), "{kept:?} should be a reference");
        }
    }

    #[test]
    fn typed_layout_finds_definition_line() {
        let source = "view : Model -> Html Msg\nview model =\n    text model.name";
        let scanner = SourceScanner::new(source);
        let layout = typed_layout(&scanner, "view").unwrap();
        assert_eq!(layout.definition, source.find("\nview").unwrap() + 1);
        assert_eq!(layout.equals, source.find('='));
    }

    #[test]
    fn signature_without_definition() {
        let scanner = SourceScanner::new("view : Model -> Html Msg");
        assert!(typed_layout(&scanner, "view").is_none());
    }

    #[test]
    fn qualified_record_access_stops_at_value() {
        let catalogue = ModuleCatalogue::default();
        let mut resolver = SymbolResolver::new("Main", &catalogue);
        let bound = FxHashSet::default();
        let id = resolve_reference("Config.defaults.timeout", &bound, &mut resolver).unwrap();
        let symbol = resolver.symbol(id).unwrap();
        assert_eq!(symbol.name, "defaults");
        assert_eq!(symbol.module_name, "Config");
        assert_eq!(symbol.parent_type_name, None);
    }
}
