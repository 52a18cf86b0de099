//! Declaration parser tests: nodes, exposing lists, arguments, return
//! types, dependency edges, and the missing-module failure.

use wirecheck_analysis::parsers::{
    parse, DeclarationNode, DeclarationTree, FunctionKind, FunctionNode,
};
use wirecheck_analysis::resolver::Symbol;
use wirecheck_core::errors::ParseError;

const MAIN: &str = include_str!("../../../test-fixtures/elm/Main.elm");

// ---- Helpers ----

fn parse_ok(source: &str) -> DeclarationTree {
    parse("Test.elm", source).expect("source should parse")
}

fn function<'t>(tree: &'t DeclarationTree, name: &str) -> &'t FunctionNode {
    tree.function(name)
        .unwrap_or_else(|| panic!("function {name} not found"))
}

/// Dependencies as `(module, name, occurrence count)`.
fn deps(tree: &DeclarationTree, name: &str) -> Vec<(String, String, usize)> {
    function(tree, name)
        .dependencies
        .iter()
        .map(|d| {
            let s = tree.symbol(d.symbol).unwrap();
            (s.module_name.clone(), s.name.clone(), d.occurrences.len())
        })
        .collect()
}

fn has_dep(tree: &DeclarationTree, function_name: &str, module: &str, name: &str) -> bool {
    deps(tree, function_name)
        .iter()
        .any(|(m, n, _)| m == module && n == name)
}

// ---- Module structure ----

#[test]
fn test_fixture_module_and_children() {
    let tree = parse_ok(MAIN);
    assert_eq!(tree.module_name(), "Main");
    let kinds: Vec<&str> = tree
        .module
        .children
        .iter()
        .map(|c| match c {
            DeclarationNode::Import(_) => "import",
            DeclarationNode::Type(_) => "type",
            DeclarationNode::TypeAlias(_) => "alias",
            DeclarationNode::Port(_) => "port",
            DeclarationNode::Function(_) => "function",
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            "import", "import", "import", "import", "alias", "type", "port", "function",
            "function", "function", "function", "function",
        ]
    );
    assert!(tree.diagnostics.is_empty());
}

#[test]
fn test_fixture_module_exposing() {
    let tree = parse_ok(MAIN);
    assert!(!tree.module.exposes_all);
    for name in ["Model", "Msg", "Increment", "Reset", "main", "update"] {
        assert!(tree.is_exposed(name), "{name} should be exposed");
    }
    for name in ["view", "step", "init", "persist"] {
        assert!(!tree.is_exposed(name), "{name} should not be exposed");
    }
}

#[test]
fn test_fixture_imports() {
    let tree = parse_ok(MAIN);
    let imports: Vec<_> = tree.imports().collect();
    assert_eq!(imports.len(), 4);
    assert_eq!(imports[2].name, "Html.Events");
    assert_eq!(imports[2].alias.as_deref(), Some("Events"));
    let exposed: Vec<_> = imports[1]
        .exposing
        .iter()
        .map(|&id| tree.symbol(id).unwrap().name.as_str())
        .collect();
    assert_eq!(exposed, vec!["Html", "button", "div", "text"]);
}

#[test]
fn test_type_constructors() {
    let tree = parse_ok(MAIN);
    let msg = tree
        .module
        .children
        .iter()
        .find_map(|c| match c {
            DeclarationNode::Type(t) if t.name == "Msg" => Some(t),
            _ => None,
        })
        .unwrap();
    let constructors: Vec<Symbol> = msg
        .constructors
        .iter()
        .map(|&id| tree.symbol(id).cloned().unwrap())
        .collect();
    assert_eq!(
        constructors,
        vec![
            Symbol::new("Increment", "Main", Some("Msg")),
            Symbol::new("Decrement", "Main", Some("Msg")),
            Symbol::new("Reset", "Main", Some("Msg")),
        ]
    );
}

// ---- Functions ----

#[test]
fn test_function_kinds_and_arguments() {
    let tree = parse_ok(MAIN);
    assert_eq!(function(&tree, "update").kind, FunctionKind::Typed);
    assert_eq!(function(&tree, "step").kind, FunctionKind::Untyped);
    assert_eq!(function(&tree, "update").arguments, vec!["msg", "model"]);
    assert_eq!(function(&tree, "init").arguments, vec!["_"]);
    assert!(function(&tree, "main").arguments.is_empty());
}

#[test]
fn test_return_types() {
    let tree = parse_ok(MAIN);
    let view = function(&tree, "view").return_type.unwrap();
    assert_eq!(tree.symbol(view), Some(&Symbol::new("Model", "Main", None)));
    let update = function(&tree, "update").return_type.unwrap();
    assert_eq!(tree.symbol(update).unwrap().qualified_name(), "Main.Msg");
    let main = function(&tree, "main").return_type.unwrap();
    assert_eq!(tree.symbol(main).unwrap().qualified_name(), "Platform.Program");
    // Unit has no symbol.
    assert_eq!(function(&tree, "init").return_type, None);
}

#[test]
fn test_return_type_is_first_word_after_colon() {
    let source = "module A exposing (..)\n\n\
                  check : Int -> String -> Bool\n\
                  check n label =\n    n > 0\n\n\
                  pair : ( Int, Int ) -> Int\n\
                  pair p =\n    Tuple.first p\n\n\
                  size : { width : Float } -> Int\n\
                  size box =\n    1\n\n\
                  ident : a -> a\n\
                  ident x =\n    x\n";
    let tree = parse_ok(source);
    let check = function(&tree, "check").return_type.unwrap();
    assert_eq!(tree.symbol(check).unwrap().qualified_name(), "Basics.Int");
    assert_eq!(function(&tree, "pair").return_type, None);
    assert_eq!(function(&tree, "size").return_type, None);
    assert_eq!(function(&tree, "ident").return_type, None);
}

#[test]
fn test_dependencies_resolve_through_imports() {
    let tree = parse_ok(MAIN);
    assert!(has_dep(&tree, "update", "Main", "step"));
    assert!(has_dep(&tree, "update", "Main", "persist"));
    assert!(has_dep(&tree, "update", "Main", "Reset"));
    assert!(has_dep(&tree, "update", "Json.Encode", "int"));
    assert!(has_dep(&tree, "view", "Html", "div"));
    assert!(has_dep(&tree, "view", "Html.Events", "onClick"));
    assert!(has_dep(&tree, "view", "String", "fromInt"));
    assert!(has_dep(&tree, "step", "Platform.Cmd", "none"));
    assert!(has_dep(&tree, "step", "Basics", "+"));
    assert!(has_dep(&tree, "main", "Browser", "element"));
    assert!(has_dep(&tree, "main", "Platform.Sub", "none"));
}

#[test]
fn test_bound_arguments_and_fields_are_not_dependencies() {
    let tree = parse_ok(MAIN);
    assert!(!has_dep(&tree, "step", "Main", "delta"));
    assert!(!has_dep(&tree, "step", "Main", "model"));
    assert!(!has_dep(&tree, "step", "Main", "count"));
    assert!(!has_dep(&tree, "view", "Main", "model"));
}

#[test]
fn test_operators_containing_equals_are_dependencies() {
    let source = "module A exposing (..)\n\n\
                  within a b =\n    \
                  a >= b && a <= b || a /= b || a == b\n";
    let tree = parse_ok(source);
    for operator in [">=", "<=", "/=", "==", "&&", "||"] {
        assert!(has_dep(&tree, "within", "Basics", operator), "missing {operator}");
    }
    assert!(!has_dep(&tree, "within", "Basics", ">"));
    assert!(!has_dep(&tree, "within", "Basics", "<"));

    let equality = deps(&tree, "within")
        .into_iter()
        .find(|(_, n, _)| n == "==")
        .unwrap();
    assert_eq!(equality.2, 1);
    let offset = function(&tree, "within")
        .dependencies
        .iter()
        .find(|d| tree.symbol(d.symbol).unwrap().name == "==")
        .unwrap()
        .occurrences[0];
    assert_eq!(&source[offset..offset + 2], "==");
}

#[test]
fn test_repeated_references_merge() {
    let tree = parse_ok(MAIN);
    let step = deps(&tree, "update")
        .into_iter()
        .find(|(m, n, _)| m == "Main" && n == "step")
        .unwrap();
    assert_eq!(step.2, 2);
}

#[test]
fn test_single_dependency_with_two_occurrences() {
    let source = "module A exposing (..)\n\nbar = 1\n\nfoo = bar, bar\n";
    let tree = parse_ok(source);
    let foo = function(&tree, "foo");
    assert_eq!(foo.dependencies.len(), 1);
    let dep = &foo.dependencies[0];
    assert_eq!(dep.symbol, function(&tree, "bar").symbol);
    let offsets: Vec<usize> = dep.occurrences.iter().copied().collect();
    let first = source.find("bar, bar").unwrap();
    assert_eq!(offsets, vec![first, first + 5]);
}

#[test]
fn test_strings_comments_and_keywords_are_skipped() {
    let source = "module A exposing (..)\n\n\
                  foo x =\n    \
                  if x then \"bar baz\" else {- qux -} quux -- zot\n";
    let tree = parse_ok(source);
    let names: Vec<String> = deps(&tree, "foo").into_iter().map(|(_, n, _)| n).collect();
    assert_eq!(names, vec!["quux"]);
}

#[test]
fn test_destructured_arguments() {
    let source = "module A exposing (..)\n\n\
                  f ( a, b ) { c, d } (Wrap e) ((x :: xs) as list) _ = a\n";
    let tree = parse_ok(source);
    assert_eq!(
        function(&tree, "f").arguments,
        vec!["a", "b", "c", "d", "e", "x", "xs", "list", "_"]
    );
}

#[test]
fn test_typed_signature_without_definition_falls_back_to_untyped() {
    let source = "module A exposing (..)\n\nfoo : Int\n\nbar = foo\n\nfoo = 1\n";
    let tree = parse_ok(source);
    let foos: Vec<_> = tree.functions().filter(|f| f.name == "foo").collect();
    assert_eq!(foos.len(), 1);
    assert_eq!(foos[0].kind, FunctionKind::Untyped);
    assert_eq!(foos[0].code, "foo = 1");
}

#[test]
fn test_lone_signature_is_kept_as_untyped() {
    let source = "module A exposing (..)\n\nfoo : Int\n";
    let tree = parse_ok(source);
    let foo = function(&tree, "foo");
    assert_eq!(foo.kind, FunctionKind::Untyped);
    assert!(foo.dependencies.is_empty());
    assert!(foo.arguments.is_empty());
}

#[test]
fn test_test_module_references() {
    let source = "module ExampleTests exposing (suite)\n\n\
                  import Expect\n\
                  import Test exposing (..)\n\n\
                  suite : Test\n\
                  suite =\n    \
                  describe \"x\" [ test \"y\" (\\_ -> Expect.pass) ]\n";
    let tree = parse_ok(source);
    assert!(has_dep(&tree, "suite", "Test", "describe"));
    assert!(has_dep(&tree, "suite", "Test", "test"));
    assert!(has_dep(&tree, "suite", "Expect", "pass"));
    let ret = function(&tree, "suite").return_type.unwrap();
    assert_eq!(tree.symbol(ret), Some(&Symbol::new("Test", "Test", None)));
}

#[test]
fn test_occurrences_are_file_offsets() {
    let tree = parse_ok(MAIN);
    let view = function(&tree, "view");
    let div = tree.symbols.find("div", "Html", None).unwrap();
    let offset = view.dependency_on(div).unwrap().occurrences[0];
    assert_eq!(&MAIN[offset..offset + 3], "div");
    assert_eq!(&MAIN[view.span.start..view.span.end], view.code);
}

// ---- Failure ----

#[test]
fn test_missing_module_is_a_failure() {
    let err = parse("Scratch.elm", "import Html\n\nfoo = 1\n").unwrap_err();
    assert_eq!(
        err,
        ParseError::MissingModuleDeclaration {
            file: "Scratch.elm".to_string()
        }
    );
    assert!(err.is_fatal());
}

#[test]
fn test_module_keyword_in_comment_does_not_count() {
    assert!(parse("A.elm", "-- module A exposing (..)\nfoo = 1\n").is_err());
}

#[test]
fn test_exposing_all() {
    let tree = parse_ok("module A exposing (..)\n\nfoo = 1\n");
    assert!(tree.module.exposes_all);
    assert!(tree.is_exposed("foo"));
    assert!(tree.is_exposed("anything"));
}

#[test]
fn test_unknown_wildcard_imports_recorded() {
    let tree = parse_ok("module A exposing (..)\n\nimport Helpers exposing (..)\nimport Test exposing (..)\n\nfoo = 1\n");
    assert_eq!(tree.wildcard_imports, vec!["Helpers".to_string()]);
}
