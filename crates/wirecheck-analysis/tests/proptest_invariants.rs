//! Property-based tests for scanner, tokenizer, resolver and analyzer
//! invariants.
//!
//! Uses proptest to fuzz-verify:
//!   - words read with comment skipping never overlap a comment
//!   - tokens reassemble to the exact source
//!   - symbol identities are stable per `(name, module, parent)`
//!   - every arity-zero candidate gets exactly one classification

use proptest::prelude::*;

use wirecheck_analysis::graph::test_topology::{AnalyzedTestModule, ExposureAnalyzer, ExposureStatus};
use wirecheck_analysis::parsers::parse;
use wirecheck_analysis::resolver::{ModuleCatalogue, SymbolResolver};
use wirecheck_analysis::scanner::{SourceScanner, DEFAULT_DELIMITERS};
use wirecheck_analysis::tokenizer::Tokenizer;

// ---- Strategies ----

fn fragment() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "foo", "Bar.baz", "x1", " ", "  ", "\n", "\n\n", "=", "(", ")", ":", "->", "[", "]", ",",
        "{- c -}", "{- {- n -} -}", "-- line\n", "\"str -- x\"", "'c'", "\"\"\"a {- b\"\"\"",
        "module", "import", "type", "alias", "port", "exposing", "infix", "é",
    ])
}

fn source() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..80).prop_map(|parts| parts.concat())
}

fn words(scanner: &SourceScanner<'_>) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(word) = scanner.word_at(cursor, true, DEFAULT_DELIMITERS) {
        found.push((word.start, word.next_index));
        cursor = word.next_index;
    }
    found
}

/// Source for `count` candidates. `calls` holds `(caller, callee)` pairs;
/// candidates with no calls are plain tests.
fn candidate_module(count: usize, exposed: &[bool], calls: &[(usize, usize)]) -> String {
    let mut exposing = vec!["helper".to_string()];
    exposing.extend((0..count).filter(|&i| exposed[i]).map(|i| format!("t{i}")));
    let mut source = format!(
        "module M exposing ({})\n\nimport Expect\nimport Test exposing (..)\n\nhelper =\n    1\n",
        exposing.join(", ")
    );
    for i in 0..count {
        let callees: Vec<String> = calls
            .iter()
            .filter(|(caller, _)| *caller == i)
            .map(|(_, callee)| format!("t{callee}"))
            .collect();
        if callees.is_empty() {
            source.push_str(&format!("\nt{i} =\n    test \"t{i}\" (\\_ -> Expect.pass)\n"));
        } else {
            source.push_str(&format!("\nt{i} =\n    describe \"t{i}\"\n        [ {} ]\n", callees.join(", ")));
        }
    }
    source
}

fn expected_status(i: usize, exposed: &[bool], calls: &[(usize, usize)]) -> ExposureStatus {
    let incoming = calls.iter().filter(|(caller, callee)| *callee == i && *caller != i).count();
    match (exposed[i], incoming) {
        (false, 0) => ExposureStatus::Hidden,
        (true, n) if n > 0 => ExposureStatus::OverExposed,
        (false, n) if n > 1 => ExposureStatus::OverExposed,
        _ => ExposureStatus::Clean,
    }
}

// ---- Scanner ----

proptest! {
    /// Words read with comment skipping never overlap a comment.
    #[test]
    fn prop_words_outside_comments(src in source()) {
        let scanner = SourceScanner::new(&src);
        for (start, end) in words(&scanner) {
            for comment in scanner.comment_ranges() {
                prop_assert!(
                    end <= comment.from || start > comment.to,
                    "word {}..{} overlaps comment {}..={} in {:?}",
                    start, end, comment.from, comment.to, src
                );
            }
        }
    }

    /// Every comment range opens with a comment marker and lies inside the
    /// source.
    #[test]
    fn prop_comment_ranges_well_formed(src in source()) {
        let scanner = SourceScanner::new(&src);
        for comment in scanner.comment_ranges() {
            prop_assert!(comment.to < src.len());
            let text = &src.as_bytes()[comment.from..];
            prop_assert!(
                text.starts_with(b"{-") || text.starts_with(b"--"),
                "comment at {} does not open with a marker", comment.from
            );
            prop_assert!(scanner.literal_at(comment.from).is_none());
        }
    }
}

// ---- Tokenizer ----

proptest! {
    /// Tokens cover the file exactly once, in order.
    #[test]
    fn prop_tokenization_is_total(src in source()) {
        let scanner = SourceScanner::new(&src);
        let stream = Tokenizer::new(&scanner).run();

        let rebuilt: String = stream.tokens.iter().map(|t| t.code.as_str()).collect();
        prop_assert_eq!(&rebuilt, &src);

        let mut expected_start = 0;
        for token in &stream.tokens {
            prop_assert_eq!(token.range.start, expected_start);
            prop_assert!(token.range.end > token.range.start);
            expected_start = token.range.end;
        }
        prop_assert_eq!(expected_start, src.len());
    }
}

// ---- Resolver ----

proptest! {
    /// Resolving the same name twice gives the same symbol; different names
    /// give different symbols.
    #[test]
    fn prop_symbol_identity_is_stable(
        names in prop::collection::vec("[a-z][a-zA-Z0-9]{0,8}", 1..20),
        parent in prop::option::of("[A-Z][a-zA-Z]{0,6}"),
    ) {
        let catalogue = ModuleCatalogue::default();
        let mut resolver = SymbolResolver::new("Own", &catalogue);
        let parent = parent.as_deref();

        let first: Vec<_> = names.iter().map(|n| resolver.resolve(n, parent, Some("Own"))).collect();
        let second: Vec<_> = names.iter().map(|n| resolver.resolve(n, parent, Some("Own"))).collect();
        prop_assert_eq!(&first, &second);

        for (i, a) in names.iter().enumerate() {
            for (j, b) in names.iter().enumerate() {
                prop_assert_eq!(a == b, first[i] == first[j]);
            }
        }
    }
}

// ---- Analyzer ----

proptest! {
    /// Each arity-zero candidate lands in exactly one class, matching the
    /// classification rule.
    #[test]
    fn prop_classification_is_total(
        exposed in prop::collection::vec(any::<bool>(), 1..6),
        raw_calls in prop::collection::vec((0usize..6, 0usize..6), 0..12),
    ) {
        let count = exposed.len();
        let calls: Vec<(usize, usize)> = raw_calls
            .into_iter()
            .map(|(caller, callee)| (caller % count, callee % count))
            .collect();
        let source = candidate_module(count, &exposed, &calls);

        let mut modules = vec![AnalyzedTestModule::new("M", "tests/M.elm", true, parse("M", &source))];
        let summary = ExposureAnalyzer::default().analyze(&mut modules);

        prop_assert_eq!(summary.total_test_count, count);
        let mut clean = 0;
        for i in 0..count {
            let test = modules[0].test(&format!("t{i}"));
            prop_assert!(test.is_some(), "t{} missing from {:?}", i, source);
            let status = test.and_then(|t| t.status());
            prop_assert_eq!(status, Some(expected_status(i, &exposed, &calls)), "t{} in {:?}", i, source);
            if status == Some(ExposureStatus::Clean) {
                clean += 1;
            }
        }
        prop_assert_eq!(summary.hidden.len() + summary.over_exposed.len() + clean, count);
    }
}
