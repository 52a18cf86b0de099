//! `DeclarationParser`: turns one file into a `DeclarationTree`.

use wirecheck_core::errors::ParseError;
use wirecheck_core::types::identifiers::SymbolId;

use super::exposing::{parse_exposing, split_top_level};
use super::functions::{self, FunctionLayout};
use super::types::{
    DeclarationNode, DeclarationTree, ExposedItem, ExposingList, FunctionKind, FunctionNode,
    ImportNode, ModuleNode, PortNode, TypeAliasNode, TypeNode,
};
use crate::resolver::{ModuleCatalogue, SymbolResolver};
use crate::scanner::{SourceScanner, DEFAULT_DELIMITERS};
use crate::tokenizer::{Token, TokenKind, TokenStream, Tokenizer};

/// Parse `source` with the standard catalogue. `file` names the source in
/// the failure value.
pub fn parse(file: &str, source: &str) -> Result<DeclarationTree, ParseError> {
    DeclarationParser::new(&ModuleCatalogue::default()).parse(file, source)
}

/// A pass-one result: complete, or a function awaiting its body scan.
enum Partial<'t> {
    Complete(DeclarationNode),
    Function {
        token: &'t Token,
        symbol: SymbolId,
        kind: FunctionKind,
        layout: Option<FunctionLayout>,
    },
}

pub struct DeclarationParser<'c> {
    catalogue: &'c ModuleCatalogue,
}

impl<'c> DeclarationParser<'c> {
    pub fn new(catalogue: &'c ModuleCatalogue) -> Self {
        Self { catalogue }
    }

    /// Parse one file.
    ///
    /// Fails only when the file has no module declaration; every other
    /// problem is a diagnostic on the returned tree.
    pub fn parse(&self, file: &str, source: &str) -> Result<DeclarationTree, ParseError> {
        let scanner = SourceScanner::new(source);
        let TokenStream { tokens, diagnostics } = Tokenizer::new(&scanner).run();
        let declarations = || tokens.iter().filter(|t| !t.kind.is_trivia());

        let Some(module_token) = declarations().find(|t| t.kind == TokenKind::Module) else {
            let err = ParseError::MissingModuleDeclaration {
                file: file.to_string(),
            };
            tracing::warn!(file, "no module declaration, file cannot be analyzed");
            return Err(err);
        };

        let mut resolver = SymbolResolver::new(&module_token.identifier, self.catalogue);
        let mut partials = Vec::new();
        let mut wildcard_imports = Vec::new();

        // Pass 1
        for token in declarations() {
            let partial = match token.kind {
                TokenKind::Module => {
                    if !std::ptr::eq(token, module_token) {
                        tracing::debug!(file, name = %token.identifier, "ignoring second module declaration");
                    }
                    continue;
                }
                TokenKind::Import => {
                    let (node, unknown_wildcard) = import_node(token, &mut resolver);
                    if unknown_wildcard {
                        wildcard_imports.push(node.name.clone());
                    }
                    Partial::Complete(DeclarationNode::Import(node))
                }
                TokenKind::Type => Partial::Complete(DeclarationNode::Type(type_node(token, &mut resolver))),
                TokenKind::TypeAlias => Partial::Complete(DeclarationNode::TypeAlias(TypeAliasNode {
                    name: token.identifier.clone(),
                    symbol: resolver.declare(&token.identifier, None),
                    span: token.range,
                })),
                TokenKind::Port => Partial::Complete(DeclarationNode::Port(PortNode {
                    name: token.identifier.clone(),
                    symbol: resolver.declare(&token.identifier, None),
                    span: token.range,
                })),
                TokenKind::TypedFunction | TokenKind::UntypedFunction => {
                    function_partial(token, &mut resolver)
                }
                TokenKind::Comment | TokenKind::Whitespace | TokenKind::Unparsed => continue,
            };
            partials.push(partial);
        }

        let (exposing, exposes_all) = module_exposing(module_token, &mut resolver);
        drop_bare_signatures(&mut partials);

        // Pass 2
        let children = partials
            .into_iter()
            .map(|partial| match partial {
                Partial::Complete(node) => node,
                Partial::Function {
                    token,
                    symbol,
                    kind,
                    layout,
                } => DeclarationNode::Function(function_node(token, symbol, kind, layout, &mut resolver)),
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            file,
            module = %module_token.identifier,
            declarations = children.len(),
            diagnostics = diagnostics.len(),
            "parsed file"
        );

        Ok(DeclarationTree {
            module: ModuleNode {
                name: module_token.identifier.clone(),
                exposing,
                exposes_all,
                children,
                span: module_token.range,
            },
            symbols: resolver.into_table(),
            wildcard_imports,
            diagnostics,
        })
    }
}

/// Resolve a module header's exposing list against the file's own
/// declarations. Runs after pass one so `Type(..)` sees every constructor.
fn module_exposing(token: &Token, resolver: &mut SymbolResolver<'_>) -> (Vec<SymbolId>, bool) {
    let scanner = SourceScanner::new(&token.code);
    let own = resolver.own_module().to_string();
    match parse_exposing(&scanner) {
        Some(ExposingList::All) => (Vec::new(), true),
        Some(ExposingList::Items(items)) => (resolve_items(&items, &own, resolver), false),
        None => (Vec::new(), false),
    }
}

/// Returns the node and whether it was a wildcard import of a module the
/// catalogue does not know.
fn import_node(token: &Token, resolver: &mut SymbolResolver<'_>) -> (ImportNode, bool) {
    let scanner = SourceScanner::new(&token.code);
    let name = token.identifier.as_str();

    // import Name [as Alias] ...
    let alias = scanner
        .word_at(0, true, DEFAULT_DELIMITERS)
        .and_then(|kw| scanner.word_at(kw.next_index, true, DEFAULT_DELIMITERS))
        .and_then(|n| scanner.word_at(n.next_index, true, DEFAULT_DELIMITERS))
        .filter(|w| w.text == "as")
        .and_then(|w| scanner.word_at(w.next_index, true, DEFAULT_DELIMITERS))
        .map(|w| w.text.to_string());

    let mut node = ImportNode {
        name: name.to_string(),
        alias: alias.clone(),
        exposing: Vec::new(),
        exposes_all: false,
        span: token.range,
    };
    let mut unknown_wildcard = false;

    match parse_exposing(&scanner) {
        Some(ExposingList::All) => {
            node.exposes_all = true;
            unknown_wildcard = !resolver.add_wildcard_import(name, alias.as_deref());
        }
        Some(ExposingList::Items(items)) => {
            node.exposing = resolve_items(&items, name, resolver);
            resolver.add_module(name, alias.as_deref(), &node.exposing);
        }
        None => resolver.add_module(name, alias.as_deref(), &[]),
    }
    (node, unknown_wildcard)
}

fn resolve_items(items: &[ExposedItem], module: &str, resolver: &mut SymbolResolver<'_>) -> Vec<SymbolId> {
    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        ids.push(resolver.resolve(item.name(), None, Some(module)));
        if let ExposedItem::TypeWithConstructors(type_name) = item {
            ids.extend(resolver.child_symbols_of(module, Some(type_name)));
        }
    }
    ids
}

/// `type Name vars = A args | B args`: declares the type and each
/// constructor with the type as its parent.
fn type_node(token: &Token, resolver: &mut SymbolResolver<'_>) -> TypeNode {
    let scanner = SourceScanner::new(&token.code);
    let symbol = resolver.declare(&token.identifier, None);
    let constructors = scanner
        .code_char_index(0, scanner.len(), b'=')
        .map(|eq| split_top_level(&scanner, eq + 1, scanner.len(), "|"))
        .unwrap_or_default()
        .iter()
        .filter_map(|alternative| alternative.split_whitespace().next())
        .filter(|name| name.starts_with(|c: char| c.is_uppercase()))
        .map(|name| resolver.declare(name, Some(&token.identifier)))
        .collect();
    TypeNode {
        name: token.identifier.clone(),
        symbol,
        constructors,
        span: token.range,
    }
}

/// Declare the function's name and lay out its pieces. A typed token whose
/// name never reappears is reclassified as untyped.
fn function_partial<'t>(token: &'t Token, resolver: &mut SymbolResolver<'_>) -> Partial<'t> {
    let symbol = resolver.declare(&token.identifier, None);
    let scanner = SourceScanner::new(&token.code);

    let (kind, layout) = match token.kind {
        TokenKind::TypedFunction => match functions::typed_layout(&scanner, &token.identifier) {
            Some(layout) => (FunctionKind::Typed, Some(layout)),
            None => {
                tracing::debug!(name = %token.identifier, "no definition after signature, treating as untyped");
                let layout = functions::untyped_layout(&scanner).filter(|l| l.equals.is_some());
                (FunctionKind::Untyped, layout)
            }
        },
        _ => (FunctionKind::Untyped, functions::untyped_layout(&scanner)),
    };

    Partial::Function {
        token,
        symbol,
        kind,
        layout,
    }
}

/// A signature with no body of its own is dropped when another declaration
/// of the same name carries the definition.
fn drop_bare_signatures(partials: &mut Vec<Partial<'_>>) {
    let defined: Vec<String> = partials
        .iter()
        .filter_map(|p| match p {
            Partial::Function {
                token,
                layout: Some(layout),
                ..
            } if layout.equals.is_some() => Some(token.identifier.clone()),
            _ => None,
        })
        .collect();

    partials.retain(|p| match p {
        Partial::Function { token, layout, .. } => {
            let bare = layout.map_or(true, |l| l.equals.is_none());
            !(bare && defined.contains(&token.identifier))
        }
        Partial::Complete(_) => true,
    });
}

fn function_node(
    token: &Token,
    symbol: SymbolId,
    kind: FunctionKind,
    layout: Option<FunctionLayout>,
    resolver: &mut SymbolResolver<'_>,
) -> FunctionNode {
    let scanner = SourceScanner::new(&token.code);

    let (arguments, return_type, dependencies) = match layout {
        Some(layout) => {
            let return_type = layout
                .signature
                .and_then(|signature| functions::return_type(&scanner, signature, resolver));
            let arguments = functions::arguments(&scanner, &layout);
            let dependencies = layout
                .equals
                .map(|eq| functions::body_dependencies(&scanner, eq, token.range.start, &arguments, resolver))
                .unwrap_or_default();
            (arguments, return_type, dependencies)
        }
        None => (Vec::new(), None, Vec::new()),
    };

    FunctionNode {
        name: token.identifier.clone(),
        kind,
        symbol,
        arguments,
        return_type,
        dependencies,
        span: token.range,
        start: token.start,
        end: token.end,
        code: token.code.clone(),
    }
}
