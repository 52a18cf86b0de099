//! Analysis configuration.

use serde::{Deserialize, Serialize};

/// Default test-framework module name.
pub const DEFAULT_TEST_MODULE: &str = "Test";

/// Default package path that defines the test-framework module.
pub const DEFAULT_TEST_MODULE_PATH: &str = "elm-explorations/test";

/// Framework functions that group tests into suites.
pub const DEFAULT_SUITE_FUNCTIONS: &[&str] = &["describe", "concat"];

/// Framework functions that declare a single test.
pub const DEFAULT_TEST_FUNCTIONS: &[&str] = &[
    "test", "fuzz", "fuzz2", "fuzz3", "fuzz4", "fuzz5", "fuzzWith", "todo",
];

/// Configuration for the test-exposure analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Module that defines `describe`/`test`. Default: "Test".
    pub test_module: Option<String>,
    /// Package path of the framework. Passed through untouched.
    pub test_module_path: Option<String>,
    /// Suite-building function names. Default: describe, concat.
    #[serde(default)]
    pub suite_functions: Vec<String>,
    /// Test-building function names. Default: test, fuzz, fuzz2..5, fuzzWith, todo.
    #[serde(default)]
    pub test_functions: Vec<String>,
    /// Extra source directories handed to file discovery.
    #[serde(default)]
    pub extra_source_dirs: Vec<String>,
    /// Parse files on the rayon pool. Default: true.
    pub parallel: Option<bool>,
}

impl AnalysisConfig {
    /// Returns the effective test module name, defaulting to "Test".
    pub fn effective_test_module(&self) -> &str {
        self.test_module.as_deref().unwrap_or(DEFAULT_TEST_MODULE)
    }

    /// Returns the effective framework package path.
    pub fn effective_test_module_path(&self) -> &str {
        self.test_module_path
            .as_deref()
            .unwrap_or(DEFAULT_TEST_MODULE_PATH)
    }

    /// Returns the suite function names, falling back to the defaults.
    pub fn effective_suite_functions(&self) -> Vec<String> {
        or_defaults(&self.suite_functions, DEFAULT_SUITE_FUNCTIONS)
    }

    /// Returns the test function names, falling back to the defaults.
    pub fn effective_test_functions(&self) -> Vec<String> {
        or_defaults(&self.test_functions, DEFAULT_TEST_FUNCTIONS)
    }

    /// Returns whether per-file parsing runs in parallel, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}

fn or_defaults(configured: &[String], defaults: &[&str]) -> Vec<String> {
    if configured.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        configured.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.effective_test_module(), "Test");
        assert_eq!(config.effective_test_module_path(), "elm-explorations/test");
        assert_eq!(config.effective_suite_functions(), vec!["describe", "concat"]);
        assert_eq!(config.effective_test_functions().len(), 8);
        assert!(config.effective_parallel());
    }

    #[test]
    fn test_configured_names_replace_defaults() {
        let config = AnalysisConfig {
            suite_functions: vec!["group".to_string()],
            ..Default::default()
        };
        assert_eq!(config.effective_suite_functions(), vec!["group"]);
    }
}
