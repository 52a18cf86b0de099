//! Top-level wirecheck configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::AnalysisConfig;
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "wirecheck.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`WIRECHECK_*`)
/// 3. Project config (`wirecheck.toml` in project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct WirecheckConfig {
    pub analysis: AnalysisConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub test_module: Option<String>,
    pub extra_source_dirs: Vec<String>,
    pub parallel: Option<bool>,
}

impl WirecheckConfig {
    /// Load configuration for the project rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            ::tracing::debug!(path = %project_config_path.display(), "merged project config");
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &WirecheckConfig) -> Result<(), ConfigError> {
        if let Some(ref module) = config.analysis.test_module {
            if !is_module_name(module) {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.test_module".to_string(),
                    message: format!("'{module}' is not a module name"),
                });
            }
        }
        for (field, names) in [
            ("analysis.suite_functions", &config.analysis.suite_functions),
            ("analysis.test_functions", &config.analysis.test_functions),
        ] {
            if let Some(bad) = names.iter().find(|n| !is_value_name(n)) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("'{bad}' is not a function name"),
                });
            }
        }
        Ok(())
    }

    fn merge_toml_file(config: &mut WirecheckConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: WirecheckConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only values set in `other` win.
    fn merge(base: &mut WirecheckConfig, other: &WirecheckConfig) {
        let (base, other) = (&mut base.analysis, &other.analysis);
        if other.test_module.is_some() {
            base.test_module = other.test_module.clone();
        }
        if other.test_module_path.is_some() {
            base.test_module_path = other.test_module_path.clone();
        }
        if !other.suite_functions.is_empty() {
            base.suite_functions = other.suite_functions.clone();
        }
        if !other.test_functions.is_empty() {
            base.test_functions = other.test_functions.clone();
        }
        if !other.extra_source_dirs.is_empty() {
            base.extra_source_dirs = other.extra_source_dirs.clone();
        }
        if other.parallel.is_some() {
            base.parallel = other.parallel;
        }
    }

    /// Pattern: `WIRECHECK_TEST_MODULE`, `WIRECHECK_PARALLEL`.
    fn apply_env_overrides(config: &mut WirecheckConfig) {
        if let Ok(val) = std::env::var("WIRECHECK_TEST_MODULE") {
            config.analysis.test_module = Some(val);
        }
        if let Ok(val) = std::env::var("WIRECHECK_PARALLEL") {
            if let Ok(v) = val.parse::<bool>() {
                config.analysis.parallel = Some(v);
            }
        }
    }

    fn apply_cli_overrides(config: &mut WirecheckConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.test_module {
            config.analysis.test_module = Some(v.clone());
        }
        if !cli.extra_source_dirs.is_empty() {
            config.analysis.extra_source_dirs = cli.extra_source_dirs.clone();
        }
        if let Some(v) = cli.parallel {
            config.analysis.parallel = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// `Test`, `Test.Runner`: dot-separated, each segment upper-case initial.
fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            chars.next().is_some_and(|c| c.is_ascii_uppercase())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn is_value_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
