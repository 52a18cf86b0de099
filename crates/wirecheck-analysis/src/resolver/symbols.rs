//! `SymbolResolver`: memoized create-on-miss name resolution for one file.

use wirecheck_core::types::collections::{FxHashMap, FxHashSet, SmallVec2};
use wirecheck_core::types::identifiers::SymbolId;

use super::builtins::{CatalogueModule, DefaultExposure, ModuleCatalogue};
use super::types::{ModuleSymbolTable, Symbol, SymbolTable};

/// Per-file symbol registry.
///
/// Seeded with the catalogue's default imports, then the file's own module.
/// Imports are registered as the parser meets them, so unqualified lookup
/// order is: default imports, own module, imports in source order.
pub struct SymbolResolver<'c> {
    catalogue: &'c ModuleCatalogue,
    own_module: String,
    own_slot: usize,
    symbols: Vec<Symbol>,
    memo: FxHashMap<Symbol, SymbolId>,
    by_name: FxHashMap<String, SmallVec2<SymbolId>>,
    /// Every symbol created in a module, exposed or not, in creation order.
    members: FxHashMap<String, Vec<SymbolId>>,
    modules: Vec<ModuleSymbolTable>,
    /// Parallel to `modules`: fast membership for `exposed`.
    visible: Vec<FxHashSet<SymbolId>>,
}

impl<'c> SymbolResolver<'c> {
    pub fn new(own_module: &str, catalogue: &'c ModuleCatalogue) -> Self {
        let mut resolver = Self {
            catalogue,
            own_module: own_module.to_string(),
            own_slot: 0,
            symbols: Vec::new(),
            memo: FxHashMap::default(),
            by_name: FxHashMap::default(),
            members: FxHashMap::default(),
            modules: Vec::new(),
            visible: Vec::new(),
        };
        for module in catalogue.default_imports() {
            if let Some(exposure) = &module.default_exposure {
                resolver.register_catalogued(module, module.alias.as_deref(), exposure);
            }
        }
        resolver.own_slot = resolver.push_table(own_module, None);
        resolver
    }

    pub fn own_module(&self) -> &str {
        &self.own_module
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn modules(&self) -> &[ModuleSymbolTable] {
        &self.modules
    }

    /// Resolve `name`, creating it on a miss.
    ///
    /// With `module_name`, only that module's members are searched (an alias
    /// is accepted) and a miss creates the symbol as a member of it. Without,
    /// every registered module's unqualified exposure is searched in order and
    /// a miss creates the symbol in the file's own module. A `None` parent
    /// matches any parent.
    pub fn resolve(&mut self, name: &str, parent: Option<&str>, module_name: Option<&str>) -> SymbolId {
        match module_name {
            Some(module) => {
                let canonical = self.canonical_module(module);
                if let Some(id) = self.find_member(name, parent, &canonical) {
                    return id;
                }
                let id = self.intern(name, &canonical, parent);
                if canonical == self.own_module {
                    self.expose(self.own_slot, id);
                }
                id
            }
            None => match self.find_visible(name, parent) {
                Some(id) => id,
                None => self.declare(name, parent),
            },
        }
    }

    /// Resolve a dotted reference such as `List.map`, `Html.Attributes.class`
    /// or `Maybe.Maybe.Just`.
    ///
    /// Module prefixes are tried longest first against registered module
    /// names and aliases. The remainder's last segment is the name and the
    /// segment before it, if any, the parent type. With no known prefix the
    /// longest prefix is taken verbatim as the module name. Returns `None`
    /// for words without a module segment.
    pub fn resolve_qualified(&mut self, dotted: &str) -> Option<SymbolId> {
        let segments: Vec<&str> = dotted.split('.').collect();
        if segments.len() < 2 || segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let known = (1..segments.len()).rev().find_map(|split| {
            let prefix = segments[..split].join(".");
            self.module_slot(&prefix).map(|slot| (split, slot))
        });

        let (module, remainder) = match known {
            Some((split, slot)) => (self.modules[slot].module_name.clone(), &segments[split..]),
            None => {
                let split = segments.len() - 1;
                (segments[..split].join("."), &segments[split..])
            }
        };

        let name = remainder[remainder.len() - 1];
        let parent = remainder.len().checked_sub(2).map(|i| remainder[i]);
        Some(self.resolve(name, parent, Some(&module)))
    }

    /// Declare a top-level name of the file's own module and expose it
    /// unqualified.
    pub fn declare(&mut self, name: &str, parent: Option<&str>) -> SymbolId {
        let own = self.own_module.clone();
        let id = self.intern(name, &own, parent);
        self.expose(self.own_slot, id);
        id
    }

    /// Register an imported module with the symbols it exposes unqualified.
    pub fn add_module(&mut self, name: &str, alias: Option<&str>, exposed: &[SymbolId]) {
        let slot = self.push_table(name, alias);
        for &id in exposed {
            self.expose(slot, id);
        }
    }

    /// Register `import name exposing (..)`.
    ///
    /// Returns `false` when the module's members are unknown (not in the
    /// catalogue), in which case only the module name and alias are
    /// registered.
    pub fn add_wildcard_import(&mut self, name: &str, alias: Option<&str>) -> bool {
        let catalogue = self.catalogue;
        match catalogue.get(name) {
            Some(module) => {
                self.register_catalogued(module, alias, &DefaultExposure::All);
                true
            }
            None => {
                self.push_table(name, alias);
                false
            }
        }
    }

    /// Members of `module_name` whose parent is `parent`, or all members when
    /// `parent` is `None`, in creation order.
    pub fn child_symbols_of(&self, module_name: &str, parent: Option<&str>) -> Vec<SymbolId> {
        let canonical = self.canonical_module(module_name);
        self.members
            .get(&canonical)
            .map(|ids| {
                ids.iter()
                    .copied()
                    .filter(|&id| match parent {
                        Some(p) => self.symbols[id.index()].parent_type_name.as_deref() == Some(p),
                        None => true,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Freeze into the file's symbol arena.
    pub fn into_table(self) -> SymbolTable {
        SymbolTable::new(self.symbols, self.modules)
    }

    fn intern(&mut self, name: &str, module: &str, parent: Option<&str>) -> SymbolId {
        let symbol = Symbol::new(name, module, parent);
        if let Some(&id) = self.memo.get(&symbol) {
            return id;
        }
        let id = SymbolId::from_index(self.symbols.len());
        self.by_name.entry(symbol.name.clone()).or_default().push(id);
        self.members.entry(symbol.module_name.clone()).or_default().push(id);
        self.memo.insert(symbol.clone(), id);
        self.symbols.push(symbol);
        id
    }

    fn push_table(&mut self, name: &str, alias: Option<&str>) -> usize {
        self.modules.push(ModuleSymbolTable::new(name, alias));
        self.visible.push(FxHashSet::default());
        self.modules.len() - 1
    }

    fn expose(&mut self, slot: usize, id: SymbolId) {
        if self.visible[slot].insert(id) {
            self.modules[slot].exposed.push(id);
        }
    }

    fn register_catalogued(&mut self, module: &CatalogueModule, alias: Option<&str>, exposure: &DefaultExposure) {
        let slot = self.push_table(&module.name, alias);
        let shown = |name: &str| match exposure {
            DefaultExposure::All => true,
            DefaultExposure::Only(names) => names.iter().any(|n| n == name),
        };

        for value in &module.values {
            let id = self.intern(value, &module.name, None);
            if shown(value) {
                self.expose(slot, id);
            }
        }
        for (type_name, constructors) in &module.types {
            let type_shown = shown(type_name);
            let id = self.intern(type_name, &module.name, None);
            if type_shown {
                self.expose(slot, id);
            }
            for constructor in constructors {
                let id = self.intern(constructor, &module.name, Some(type_name));
                if type_shown {
                    self.expose(slot, id);
                }
            }
        }
    }

    fn module_slot(&self, name: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.answers_to(name))
    }

    fn canonical_module(&self, name: &str) -> String {
        self.module_slot(name)
            .map_or_else(|| name.to_string(), |slot| self.modules[slot].module_name.clone())
    }

    fn find_member(&self, name: &str, parent: Option<&str>, module: &str) -> Option<SymbolId> {
        let candidates = self.by_name.get(name)?;
        let in_module = |id: &&SymbolId| self.symbols[id.index()].module_name == module;
        // An exact parent match beats a wildcard one.
        candidates
            .iter()
            .filter(in_module)
            .find(|id| self.symbols[id.index()].parent_type_name.as_deref() == parent)
            .or_else(|| {
                candidates
                    .iter()
                    .filter(in_module)
                    .find(|id| self.symbols[id.index()].matches_parent(parent))
            })
            .copied()
    }

    fn find_visible(&self, name: &str, parent: Option<&str>) -> Option<SymbolId> {
        let candidates = self.by_name.get(name)?;
        self.visible.iter().find_map(|visible| {
            candidates
                .iter()
                .copied()
                .find(|id| visible.contains(id) && self.symbols[id.index()].matches_parent(parent))
        })
    }
}
