// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for application config loading.

use std::path::PathBuf;

use dirscanner_config::diagnostic::ConfigError;
use dirscanner_config::{load_and_validate_str, load_config, load_config_from_str};
use figment::Jail;

#[test]
fn empty_input_yields_defaults() {
    let config = load_config_from_str("").expect("defaults should load");
    assert_eq!(config.plugins.ext_dir, PathBuf::from("ext"));
    assert_eq!(config.plugins.shutdown_timeout_secs, 30);
    assert!(config.plugins.config_override.is_none());
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn full_config_deserializes() {
    let toml = r#"
[plugins]
ext_dir = "/opt/dirscanner/ext"
shutdown_timeout_secs = 5
config_override = "/etc/dirscanner/plugins.toml"

[logging]
level = "debug"
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.plugins.ext_dir, PathBuf::from("/opt/dirscanner/ext"));
    assert_eq!(config.plugins.shutdown_timeout_secs, 5);
    assert_eq!(
        config.plugins.config_override,
        Some(PathBuf::from("/etc/dirscanner/plugins.toml"))
    );
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn unknown_key_gets_suggestion() {
    let toml = "[plugins]\next_dri = \"ext\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "ext_dri");
            assert_eq!(suggestion.as_deref(), Some("ext_dir"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

#[test]
fn wrong_type_is_reported() {
    let toml = "[plugins]\nshutdown_timeout_secs = \"soon\"\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "got {errors:?}"
    );
}

#[test]
fn validation_runs_after_deserialization() {
    let toml = "[plugins]\nshutdown_timeout_secs = 0\n";
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

#[test]
fn local_file_and_env_layer_over_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "dirscanner.toml",
            r#"
[plugins]
ext_dir = "plugins"
shutdown_timeout_secs = 10
"#,
        )?;
        jail.set_env("DIRSCANNER_PLUGINS_SHUTDOWN_TIMEOUT_SECS", "3");
        jail.set_env("DIRSCANNER_LOGGING_LEVEL", "info");

        let config = load_config()?;
        assert_eq!(config.plugins.ext_dir, PathBuf::from("plugins"));
        assert_eq!(config.plugins.shutdown_timeout_secs, 3);
        assert_eq!(config.logging.level, "info");
        Ok(())
    });
}
