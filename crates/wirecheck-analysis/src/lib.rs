//! wirecheck-analysis: finds hidden and over-exposed tests.
//!
//! Pipeline, leaves first:
//! - `scanner`: comment- and literal-aware word and bracket queries
//! - `tokenizer`: top-level declaration tokens with ranges and positions
//! - `resolver`: per-file qualified-name resolution to `SymbolId`s
//! - `parsers`: declaration trees with function dependency edges
//! - `graph::test_topology`: candidate selection and exposure analysis
//! - `engine`: one run over an in-memory file set

pub mod engine;
pub mod graph;
pub mod parsers;
pub mod resolver;
pub mod scanner;
pub mod tokenizer;

pub use engine::{ExposureEngine, ExposureReport, SourceFile};
pub use graph::test_topology::{ExposureAnalyzer, ExposureStatus, ExposureSummary};
