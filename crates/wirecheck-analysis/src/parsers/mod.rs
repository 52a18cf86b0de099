//! Declaration parser: two passes over the tokenizer's declarations.
//!
//! Pass one completes every import, type, alias and port node and declares
//! each top-level name. Pass two scans function bodies for references and
//! builds their dependency edges.

pub mod declaration_parser;
pub mod exposing;
pub mod functions;
pub mod types;

pub use declaration_parser::{parse, DeclarationParser};
pub use exposing::parse_exposing;
pub use functions::{FUNCTION_DELIMITERS, RESERVED_WORDS};
pub use types::{
    DeclarationNode, DeclarationTree, Dependency, ExposedItem, ExposingList, FunctionKind,
    FunctionNode, ImportNode, ModuleNode, PortNode, TypeAliasNode, TypeNode,
};
