//! Test topology types: analyzed modules, candidates, exposure summary.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wirecheck_core::errors::{ErrorCode, ParseError};
use wirecheck_core::types::collections::Occurrences;

use crate::parsers::{DeclarationTree, FunctionNode};
use crate::scanner::Position;

/// One source file as seen by the analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzedTestModule {
    pub key: String,
    pub file_path: PathBuf,
    pub is_test_file: bool,
    /// `None` when the file failed structural parsing.
    pub declaration_tree: Option<DeclarationTree>,
    pub failure: Option<ParseError>,
    /// Candidates found in this module, filled by the analyzer.
    pub tests: Vec<AnalyzedTestFunction>,
}

impl AnalyzedTestModule {
    pub fn new(
        key: impl Into<String>,
        file_path: impl Into<PathBuf>,
        is_test_file: bool,
        result: Result<DeclarationTree, ParseError>,
    ) -> Self {
        let (declaration_tree, failure) = match result {
            Ok(tree) => (Some(tree), None),
            Err(err) => (None, Some(err)),
        };
        Self {
            key: key.into(),
            file_path: file_path.into(),
            is_test_file,
            declaration_tree,
            failure,
            tests: Vec::new(),
        }
    }

    pub fn parsed(&self) -> bool {
        self.declaration_tree.is_some()
    }

    pub fn module_name(&self) -> Option<&str> {
        self.declaration_tree.as_ref().map(DeclarationTree::module_name)
    }

    /// Names of the arity-zero candidates the module exposes, in
    /// declaration order. With the module name, this is what an entry-point
    /// generator needs to run the module's tests.
    pub fn exposed_tests(&self) -> Vec<&str> {
        self.tests
            .iter()
            .filter(|t| t.is_directly_exposed && t.function.arity() == 0)
            .map(|t| t.function.name.as_str())
            .collect()
    }

    pub fn test(&self, name: &str) -> Option<&AnalyzedTestFunction> {
        self.tests.iter().find(|t| t.function.name == name)
    }
}

/// A test or suite candidate.
#[derive(Debug, Clone)]
pub struct AnalyzedTestFunction {
    pub owner_module_key: String,
    pub module_name: String,
    pub function: FunctionNode,
    pub is_directly_exposed: bool,
    pub indirect_exposures: Vec<IndirectExposure>,
    pub is_suite: bool,
    pub is_test: bool,
}

impl AnalyzedTestFunction {
    /// Total references from other candidates.
    pub fn indirect_occurrence_count(&self) -> usize {
        self.indirect_exposures.iter().map(|e| e.occurrences.len()).sum()
    }

    /// Classification; `None` for candidates that take arguments, which are
    /// never flagged.
    pub fn status(&self) -> Option<ExposureStatus> {
        if self.function.arity() > 0 {
            return None;
        }
        let status = match (self.is_directly_exposed, self.indirect_exposures.is_empty()) {
            (false, true) => ExposureStatus::Hidden,
            (true, false) => ExposureStatus::OverExposed,
            (false, false) if self.indirect_occurrence_count() > 1 => ExposureStatus::OverExposed,
            _ => ExposureStatus::Clean,
        };
        Some(status)
    }
}

/// A reference to a candidate from another candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndirectExposure {
    pub from_module_key: String,
    pub from_function: String,
    /// Byte offsets of the references in the caller's file.
    pub occurrences: Occurrences,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExposureStatus {
    /// Reaches the entry point through no path.
    Hidden,
    /// Reaches the entry point through more than one path.
    OverExposed,
    Clean,
}

impl ExposureStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::OverExposed => "over_exposed",
            Self::Clean => "clean",
        }
    }
}

/// A flagged candidate with the position data a reporter needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlaggedTest {
    pub module_key: String,
    pub module_name: String,
    pub file_path: PathBuf,
    pub function_name: String,
    pub status: ExposureStatus,
    pub is_suite: bool,
    pub is_test: bool,
    pub is_directly_exposed: bool,
    pub start: Position,
    pub end: Position,
    pub code: String,
    pub exposures: Vec<IndirectExposure>,
}

impl FlaggedTest {
    pub(crate) fn new(module: &AnalyzedTestModule, test: &AnalyzedTestFunction, status: ExposureStatus) -> Self {
        Self {
            module_key: module.key.clone(),
            module_name: test.module_name.clone(),
            file_path: module.file_path.clone(),
            function_name: test.function.name.clone(),
            status,
            is_suite: test.is_suite,
            is_test: test.is_test,
            is_directly_exposed: test.is_directly_exposed,
            start: test.function.start,
            end: test.function.end,
            code: test.function.code.clone(),
            exposures: test.indirect_exposures.clone(),
        }
    }
}

/// A test file that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub module_key: String,
    pub file_path: PathBuf,
    pub code: String,
    pub message: String,
}

impl AnalysisFailure {
    pub(crate) fn new(module: &AnalyzedTestModule, error: &ParseError) -> Self {
        Self {
            module_key: module.key.clone(),
            file_path: module.file_path.clone(),
            code: error.error_code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExposureSummary {
    pub hidden: Vec<FlaggedTest>,
    pub over_exposed: Vec<FlaggedTest>,
    pub analysis_failures: Vec<AnalysisFailure>,
    /// Candidates across all analyzed test modules, any arity.
    pub total_test_count: usize,
}

impl ExposureSummary {
    /// No hidden or over-exposed candidates and no failures.
    pub fn is_clean(&self) -> bool {
        self.hidden.is_empty() && self.over_exposed.is_empty() && self.analysis_failures.is_empty()
    }

    pub fn flagged_count(&self) -> usize {
        self.hidden.len() + self.over_exposed.len()
    }
}
