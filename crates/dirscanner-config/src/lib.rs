// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the dirscanner framework.
//!
//! Two concerns live here:
//!
//! - the application config ([`DirScannerConfig`]), layered with Figment from
//!   system, user, and local TOML files plus `DIRSCANNER_*` env vars, with
//!   miette diagnostics for unknown keys and bad values;
//! - per-plugin config lookup ([`ConfigurationResolver`]), which never fails
//!   and degrades to [`ConfigLookup::Absent`].

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod resolver;
pub mod validation;

use std::path::PathBuf;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::DirScannerConfig;
pub use resolver::{ConfigLookup, ConfigurationResolver, ScopedConfig};

/// Load from the standard hierarchy and validate.
pub fn load_and_validate() -> Result<DirScannerConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load a TOML string over the defaults and validate.
pub fn load_and_validate_str(toml_content: &str) -> Result<DirScannerConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Contents of whichever config files exist, for pointing diagnostics at them.
fn collect_toml_sources() -> Vec<(String, String)> {
    let local = std::env::current_dir()
        .map(|d| d.join(loader::LOCAL_CONFIG_FILE))
        .unwrap_or_else(|_| PathBuf::from(loader::LOCAL_CONFIG_FILE));

    [
        Some(local),
        loader::user_config_path(),
        Some(PathBuf::from(loader::SYSTEM_CONFIG_PATH)),
    ]
    .into_iter()
    .flatten()
    .filter_map(|path| {
        std::fs::read_to_string(&path)
            .ok()
            .map(|content| (path.display().to_string(), content))
    })
    .collect()
}
