//! Declaration nodes and the per-file declaration tree.

use serde::{Deserialize, Serialize};
use wirecheck_core::errors::ParseError;
use wirecheck_core::types::collections::Occurrences;
use wirecheck_core::types::identifiers::SymbolId;

use crate::resolver::{Symbol, SymbolTable};
use crate::scanner::{Position, TextRange};

/// An item of an `exposing (...)` list, before resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExposedItem {
    /// A value or operator: `foo`, `(+)`.
    Value(String),
    /// A type without its constructors: `Maybe`.
    OpaqueType(String),
    /// A type with its constructors: `Maybe(..)`.
    TypeWithConstructors(String),
}

impl ExposedItem {
    pub fn name(&self) -> &str {
        match self {
            Self::Value(n) | Self::OpaqueType(n) | Self::TypeWithConstructors(n) => n,
        }
    }
}

/// A parsed `exposing (...)` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExposingList {
    /// `exposing (..)`
    All,
    Items(Vec<ExposedItem>),
}

/// An edge from a function to one symbol it references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub symbol: SymbolId,
    /// Byte offset in the file of every reference, in source order.
    pub occurrences: Occurrences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FunctionKind {
    Typed,
    Untyped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionNode {
    pub name: String,
    pub kind: FunctionKind,
    pub symbol: SymbolId,
    /// Parameter names in order, including names bound by tuple, record and
    /// constructor patterns. `_` stands for a wildcard parameter.
    pub arguments: Vec<String>,
    pub return_type: Option<SymbolId>,
    /// Deduplicated by symbol, in order of first reference.
    pub dependencies: Vec<Dependency>,
    pub span: TextRange,
    pub start: Position,
    pub end: Position,
    /// Raw source of the whole declaration, signature included.
    pub code: String,
}

impl FunctionNode {
    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    pub fn dependency_on(&self, symbol: SymbolId) -> Option<&Dependency> {
        self.dependencies.iter().find(|d| d.symbol == symbol)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportNode {
    pub name: String,
    pub alias: Option<String>,
    /// Resolved explicit exposing items; empty for `exposing (..)`.
    pub exposing: Vec<SymbolId>,
    pub exposes_all: bool,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    pub name: String,
    pub symbol: SymbolId,
    pub constructors: Vec<SymbolId>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasNode {
    pub name: String,
    pub symbol: SymbolId,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortNode {
    pub name: String,
    pub symbol: SymbolId,
    pub span: TextRange,
}

/// One top-level declaration below the module header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclarationNode {
    Import(ImportNode),
    Type(TypeNode),
    TypeAlias(TypeAliasNode),
    Port(PortNode),
    Function(FunctionNode),
}

impl DeclarationNode {
    pub fn name(&self) -> &str {
        match self {
            Self::Import(n) => &n.name,
            Self::Type(n) => &n.name,
            Self::TypeAlias(n) => &n.name,
            Self::Port(n) => &n.name,
            Self::Function(n) => &n.name,
        }
    }

    pub fn span(&self) -> TextRange {
        match self {
            Self::Import(n) => n.span,
            Self::Type(n) => n.span,
            Self::TypeAlias(n) => n.span,
            Self::Port(n) => n.span,
            Self::Function(n) => n.span,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionNode> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }
}

/// Root node: the module header and every declaration in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleNode {
    pub name: String,
    /// Resolved explicit exposing items; empty for `exposing (..)`.
    pub exposing: Vec<SymbolId>,
    pub exposes_all: bool,
    pub children: Vec<DeclarationNode>,
    pub span: TextRange,
}

/// Everything the parser learned about one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationTree {
    pub module: ModuleNode,
    pub symbols: SymbolTable,
    /// Modules imported with `exposing (..)` whose members the catalogue
    /// does not know. Unqualified names may come from any of them.
    pub wildcard_imports: Vec<String>,
    /// Non-fatal tokenizer diagnostics.
    #[serde(skip)]
    pub diagnostics: Vec<ParseError>,
}

impl DeclarationTree {
    pub fn module_name(&self) -> &str {
        &self.module.name
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionNode> {
        self.module.children.iter().filter_map(DeclarationNode::as_function)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionNode> {
        self.functions().find(|f| f.name == name)
    }

    pub fn imports(&self) -> impl Iterator<Item = &ImportNode> {
        self.module.children.iter().filter_map(|n| match n {
            DeclarationNode::Import(i) => Some(i),
            _ => None,
        })
    }

    /// Whether the module header publishes a top-level `name`.
    pub fn is_exposed(&self, name: &str) -> bool {
        self.module.exposes_all
            || self.module.exposing.iter().any(|&id| {
                self.symbols
                    .get(id)
                    .is_some_and(|s| s.name == name && s.module_name == self.module.name)
            })
    }
}
