//! wirecheck-core: shared foundation for the wirecheck analyzer.
//!
//! - Errors: one `thiserror` enum per subsystem with stable error codes
//! - Config: TOML-based, layered resolution (CLI > env > project > defaults)
//! - Tracing: `tracing-subscriber` setup driven by `WIRECHECK_LOG`
//! - Types: fast collections and index identifiers

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;
