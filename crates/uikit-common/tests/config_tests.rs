//! ---
//! uikit_section: "15-testing-qa-runbook"
//! uikit_subsection: "module"
//! uikit_type: "source"
//! uikit_scope: "code"
//! uikit_description: "Configuration loading integration tests."
//! uikit_version: "v0.0.0-prealpha"
//! uikit_owner: "tbd"
//! ---
use std::fs;
use std::time::Duration;

use uikit_common::{LogFormat, MicrotaskStrategy, UikitConfig};

const SAMPLE: &str = r#"
[timing]
throttle_delay_ms = 120
debounce_delay_ms = 40
microtask = "channel"

[logging]
directory = "target/uikit-logs"
format = "structured-json"
file_prefix = "tabs"
"#;

#[test]
fn loads_first_existing_candidate() {
    if std::env::var(UikitConfig::ENV_CONFIG_PATH).is_ok() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let present = dir.path().join("uikit.toml");
    fs::write(&present, SAMPLE).unwrap();

    let loaded = UikitConfig::load_with_source(&[missing, present.clone()]).unwrap();
    assert_eq!(loaded.source, present);
    assert_eq!(loaded.config.timing.throttle_delay, Duration::from_millis(120));
    assert_eq!(loaded.config.timing.debounce_delay, Duration::from_millis(40));
    assert_eq!(loaded.config.timing.microtask, MicrotaskStrategy::Channel);
    assert_eq!(loaded.config.logging.format, LogFormat::StructuredJson);
    assert_eq!(loaded.config.logging.file_prefix.as_deref(), Some("tabs"));
}

#[test]
fn reports_inspected_paths_when_nothing_exists() {
    if std::env::var(UikitConfig::ENV_CONFIG_PATH).is_ok() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = UikitConfig::load(&[missing]).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn invalid_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[timing]\nthrottle_delay_ms = \"fast\"\n").unwrap();
    let err = UikitConfig::from_path(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("broken.toml"));
}
