//! Configuration system for wirecheck.
//! TOML-based, 3-layer resolution: CLI > env > project > defaults.

pub mod analysis_config;
pub mod wirecheck_config;

pub use analysis_config::AnalysisConfig;
pub use wirecheck_config::{CliOverrides, WirecheckConfig};
