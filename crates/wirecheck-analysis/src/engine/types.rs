//! Engine input and output types.

use std::path::PathBuf;
use std::time::SystemTime;

use serde::Serialize;

use crate::graph::test_topology::{AnalyzedTestModule, ExposureSummary};

/// One file handed over by file discovery.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Stable identity of the file within a run.
    pub key: String,
    pub path: PathBuf,
    pub is_test_file: bool,
    /// Lets discovery reuse results for unchanged files. Not read here.
    pub last_modified: Option<SystemTime>,
    pub text: String,
}

impl SourceFile {
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>, is_test_file: bool, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            is_test_file,
            last_modified: None,
            text: text.into(),
        }
    }

    pub fn with_last_modified(mut self, last_modified: SystemTime) -> Self {
        self.last_modified = Some(last_modified);
        self
    }
}

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct ExposureReport {
    /// One entry per input file, in input order.
    pub modules: Vec<AnalyzedTestModule>,
    pub summary: ExposureSummary,
}

impl ExposureReport {
    pub fn module(&self, key: &str) -> Option<&AnalyzedTestModule> {
        self.modules.iter().find(|m| m.key == key)
    }

    /// Per test module, its name and exposed tests: the entry-point
    /// generator's input.
    pub fn suite_entries(&self) -> Vec<SuiteEntry<'_>> {
        self.modules
            .iter()
            .filter(|m| m.is_test_file)
            .filter_map(|m| {
                Some(SuiteEntry {
                    module_name: m.module_name()?,
                    tests: m.exposed_tests(),
                })
            })
            .filter(|entry| !entry.tests.is_empty())
            .collect()
    }
}

/// A test module's contribution to the generated entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteEntry<'a> {
    pub module_name: &'a str,
    pub tests: Vec<&'a str>,
}
