// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::DirScannerConfig;

/// Upper bound on the per-plugin shutdown timeout.
pub const MAX_SHUTDOWN_TIMEOUT_SECS: u64 = 3600;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Collects every violation rather than stopping at the first.
pub fn validate_config(config: &DirScannerConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.plugins.ext_dir.as_os_str().is_empty() {
        errors.push(ConfigError::Validation {
            message: "plugins.ext_dir must not be empty".to_string(),
        });
    }

    let timeout = config.plugins.shutdown_timeout_secs;
    if timeout == 0 || timeout > MAX_SHUTDOWN_TIMEOUT_SECS {
        errors.push(ConfigError::Validation {
            message: format!(
                "plugins.shutdown_timeout_secs must be between 1 and {MAX_SHUTDOWN_TIMEOUT_SECS}, got {timeout}"
            ),
        });
    }

    let level = config.logging.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&DirScannerConfig::default()).is_ok());
    }

    #[test]
    fn zero_timeout_and_bad_level_are_both_reported() {
        let mut config = DirScannerConfig::default();
        config.plugins.shutdown_timeout_secs = 0;
        config.logging.level = "chatty".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].to_string().contains("shutdown_timeout_secs"));
        assert!(errors[1].to_string().contains("chatty"));
    }

    #[test]
    fn level_is_case_insensitive() {
        let mut config = DirScannerConfig::default();
        config.logging.level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
