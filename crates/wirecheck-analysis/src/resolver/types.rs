//! Resolver types.

use serde::{Deserialize, Serialize};
use wirecheck_core::types::identifiers::SymbolId;

/// A resolved, module-qualified identity for a function, type, or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub module_name: String,
    /// Owning type for constructors; the record or field owner for
    /// qualified `Module.Type.member` references.
    pub parent_type_name: Option<String>,
}

impl Symbol {
    pub fn new(name: &str, module_name: &str, parent_type_name: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            module_name: module_name.to_string(),
            parent_type_name: parent_type_name.map(str::to_string),
        }
    }

    /// `Module.name` or `Module.Parent.name`.
    pub fn qualified_name(&self) -> String {
        match &self.parent_type_name {
            Some(parent) => format!("{}.{}.{}", self.module_name, parent, self.name),
            None => format!("{}.{}", self.module_name, self.name),
        }
    }

    /// True when `parent` is `None` (any parent) or names this symbol's parent.
    pub fn matches_parent(&self, parent: Option<&str>) -> bool {
        parent.is_none() || self.parent_type_name.as_deref() == parent
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qualified_name())
    }
}

/// One module known to a resolver and the symbols visible unqualified
/// through it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSymbolTable {
    pub module_name: String,
    pub alias: Option<String>,
    /// Symbols this module makes visible without qualification.
    pub exposed: Vec<SymbolId>,
}

impl ModuleSymbolTable {
    pub fn new(module_name: &str, alias: Option<&str>) -> Self {
        Self {
            module_name: module_name.to_string(),
            alias: alias.map(str::to_string),
            exposed: Vec::new(),
        }
    }

    /// Whether `name` refers to this module by its full name or its alias.
    pub fn answers_to(&self, name: &str) -> bool {
        self.module_name == name || self.alias.as_deref() == Some(name)
    }
}

/// Frozen symbol arena of one parsed file. `SymbolId`s index into it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    modules: Vec<ModuleSymbolTable>,
}

impl SymbolTable {
    pub(crate) fn new(symbols: Vec<Symbol>, modules: Vec<ModuleSymbolTable>) -> Self {
        Self { symbols, modules }
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId::from_index(i), s))
    }

    /// Modules in registration order.
    pub fn modules(&self) -> &[ModuleSymbolTable] {
        &self.modules
    }

    /// Exact `(name, module, parent)` lookup.
    pub fn find(&self, name: &str, module_name: &str, parent: Option<&str>) -> Option<SymbolId> {
        self.iter()
            .find(|(_, s)| {
                s.name == name
                    && s.module_name == module_name
                    && s.parent_type_name.as_deref() == parent
            })
            .map(|(id, _)| id)
    }
}
