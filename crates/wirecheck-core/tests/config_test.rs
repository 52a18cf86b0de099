//! Tests for the wirecheck configuration system.

use std::sync::Mutex;

use wirecheck_core::config::{CliOverrides, WirecheckConfig};
use wirecheck_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_env_vars() {
    for key in ["WIRECHECK_TEST_MODULE", "WIRECHECK_PARALLEL"] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("wirecheck.toml"),
        r#"
[analysis]
test_module = "Spec"
parallel = false
extra_source_dirs = ["tests", "shared"]
"#,
    )
    .unwrap();

    std::env::set_var("WIRECHECK_PARALLEL", "true");

    let cli = CliOverrides {
        test_module: Some("Test".to_string()),
        ..Default::default()
    };

    let config = WirecheckConfig::load(dir.path(), Some(&cli)).unwrap();

    // CLI wins over project
    assert_eq!(config.analysis.effective_test_module(), "Test");
    // Env wins over project
    assert_eq!(config.analysis.parallel, Some(true));
    // Project wins over defaults
    assert_eq!(config.analysis.extra_source_dirs, vec!["tests", "shared"]);

    clear_env_vars();
}

#[test]
fn test_missing_project_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let config = WirecheckConfig::load(dir.path(), None).unwrap();
    assert_eq!(config, WirecheckConfig::default());
    assert_eq!(config.analysis.effective_test_module(), "Test");
}

#[test]
fn test_invalid_toml_reports_path() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("wirecheck.toml"), "[analysis\nbroken").unwrap();

    let err = WirecheckConfig::load(dir.path(), None).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("wirecheck.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_env_module_is_validated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    std::env::set_var("WIRECHECK_TEST_MODULE", "lowercase");
    let dir = tempdir();
    let err = WirecheckConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));

    clear_env_vars();
}

#[test]
fn test_from_toml_rejects_bad_function_names() {
    let err = WirecheckConfig::from_toml(
        r#"
[analysis]
test_functions = ["test", "Fuzz"]
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_toml_round_trip() {
    let config = WirecheckConfig::from_toml(
        r#"
[analysis]
test_module = "Test"
suite_functions = ["describe"]
"#,
    )
    .unwrap();
    let rendered = config.to_toml().unwrap();
    let reparsed = WirecheckConfig::from_toml(&rendered).unwrap();
    assert_eq!(config, reparsed);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = WirecheckConfig::from_toml(
        r#"
[analysis]
test_module = "Test"
future_option = 3

[reporting]
color = true
"#,
    )
    .unwrap();
    assert_eq!(config.analysis.effective_test_module(), "Test");
}
