//! Exposure engine: one analysis run over an in-memory file set.
//!
//! Files are parsed independently (on the rayon pool when enabled), each
//! with its own resolver. The analyzer then runs single-threaded over the
//! full module set.

pub mod pipeline;
pub mod types;

pub use pipeline::ExposureEngine;
pub use types::{ExposureReport, SourceFile, SuiteEntry};
