//! Test framework recognition.

use wirecheck_core::config::AnalysisConfig;
use wirecheck_core::types::collections::FxHashSet;

use crate::parsers::{DeclarationTree, FunctionNode};
use crate::resolver::Symbol;

/// What a candidate builds, judged by the framework functions it calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CandidateKind {
    pub is_suite: bool,
    pub is_test: bool,
}

impl CandidateKind {
    pub fn is_candidate(&self) -> bool {
        self.is_suite || self.is_test
    }
}

/// The test framework's module and the function names that mark suites
/// and tests.
#[derive(Debug, Clone)]
pub struct TestFramework {
    pub module_name: String,
    /// Package path of the framework; carried for outer layers.
    pub module_path: String,
    suite_functions: FxHashSet<String>,
    test_functions: FxHashSet<String>,
}

impl TestFramework {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            module_name: config.effective_test_module().to_string(),
            module_path: config.effective_test_module_path().to_string(),
            suite_functions: config.effective_suite_functions().into_iter().collect(),
            test_functions: config.effective_test_functions().into_iter().collect(),
        }
    }

    pub fn is_suite_function(&self, symbol: &Symbol) -> bool {
        self.is_framework(symbol) && self.suite_functions.contains(&symbol.name)
    }

    pub fn is_test_function(&self, symbol: &Symbol) -> bool {
        self.is_framework(symbol) && self.test_functions.contains(&symbol.name)
    }

    /// Classify `function` by its references into the framework module.
    pub fn classify(&self, function: &FunctionNode, tree: &DeclarationTree) -> CandidateKind {
        function
            .dependencies
            .iter()
            .filter_map(|dep| tree.symbol(dep.symbol))
            .fold(CandidateKind::default(), |kind, symbol| CandidateKind {
                is_suite: kind.is_suite || self.is_suite_function(symbol),
                is_test: kind.is_test || self.is_test_function(symbol),
            })
    }

    fn is_framework(&self, symbol: &Symbol) -> bool {
        symbol.module_name == self.module_name && symbol.parent_type_name.is_none()
    }
}

impl Default for TestFramework {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}
