//! Test topology: which test and suite functions reach the generated entry
//! point, and how many times.
//!
//! Candidates are found by their references to the test framework's
//! functions, linked by dependency edges into a petgraph graph, and
//! classified as hidden, over-exposed, or clean.

pub mod exposure;
pub mod frameworks;
pub mod types;

pub use exposure::ExposureAnalyzer;
pub use frameworks::{CandidateKind, TestFramework};
pub use types::*;
