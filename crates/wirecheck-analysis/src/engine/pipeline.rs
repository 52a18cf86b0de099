//! `ExposureEngine`: parse then analyze.

use rayon::prelude::*;
use wirecheck_core::config::AnalysisConfig;

use super::types::{ExposureReport, SourceFile};
use crate::graph::test_topology::{AnalyzedTestModule, ExposureAnalyzer};
use crate::parsers::DeclarationParser;
use crate::resolver::ModuleCatalogue;

pub struct ExposureEngine {
    catalogue: ModuleCatalogue,
    analyzer: ExposureAnalyzer,
    parallel: bool,
}

impl ExposureEngine {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            catalogue: ModuleCatalogue::from_config(config),
            analyzer: ExposureAnalyzer::from_config(config),
            parallel: config.effective_parallel(),
        }
    }

    /// Parse one file into an analyzer module. A parse failure is kept on
    /// the module, not dropped.
    pub fn parse_file(&self, file: &SourceFile) -> AnalyzedTestModule {
        let result = DeclarationParser::new(&self.catalogue).parse(&file.key, &file.text);
        if let Err(err) = &result {
            tracing::debug!(key = %file.key, error = %err, "file not analyzable");
        }
        AnalyzedTestModule::new(file.key.clone(), file.path.clone(), file.is_test_file, result)
    }

    /// Parse every file, preserving input order.
    pub fn parse_all(&self, files: &[SourceFile]) -> Vec<AnalyzedTestModule> {
        if self.parallel {
            files.par_iter().map(|file| self.parse_file(file)).collect()
        } else {
            files.iter().map(|file| self.parse_file(file)).collect()
        }
    }

    /// Full run: parse, then analyze.
    pub fn run(&self, files: &[SourceFile]) -> ExposureReport {
        tracing::info!(
            files = files.len(),
            test_files = files.iter().filter(|f| f.is_test_file).count(),
            parallel = self.parallel,
            "starting exposure run"
        );
        let mut modules = self.parse_all(files);
        let summary = self.analyzer.analyze(&mut modules);
        ExposureReport { modules, summary }
    }
}

impl Default for ExposureEngine {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}
