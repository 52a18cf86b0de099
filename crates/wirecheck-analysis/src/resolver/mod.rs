//! Symbol resolver: per-file registry of modules and the symbols they expose.
//!
//! Bare and dotted names resolve to a canonical `SymbolId`. Unknown names are
//! created on first use and memoized, so one `(name, module, parent)` triple
//! always maps to one id for the lifetime of a resolver.

pub mod builtins;
pub mod symbols;
pub mod types;

pub use builtins::{CatalogueModule, ModuleCatalogue};
pub use symbols::SymbolResolver;
pub use types::{ModuleSymbolTable, Symbol, SymbolTable};
