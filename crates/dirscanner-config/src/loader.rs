// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered application config loading with Figment.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/dirscanner/dirscanner.toml`
//! 3. `~/.config/dirscanner/dirscanner.toml`
//! 4. `./dirscanner.toml`
//! 5. `DIRSCANNER_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DirScannerConfig;

pub const SYSTEM_CONFIG_PATH: &str = "/etc/dirscanner/dirscanner.toml";
pub const LOCAL_CONFIG_FILE: &str = "dirscanner.toml";

/// Load configuration from the standard hierarchy with env overrides.
pub fn load_config() -> Result<DirScannerConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string over the compiled defaults.
pub fn load_config_from_str(toml_content: &str) -> Result<DirScannerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DirScannerConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one explicit file, still honouring env overrides.
pub fn load_config_from_path(path: &Path) -> Result<DirScannerConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DirScannerConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The unextracted Figment behind [`load_config`].
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(DirScannerConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `~/.config/dirscanner/dirscanner.toml`, if a config dir is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dirscanner").join(LOCAL_CONFIG_FILE))
}

/// `DIRSCANNER_PLUGINS_EXT_DIR` -> `plugins.ext_dir`.
///
/// Only the first underscore after the section name becomes a dot, so keys
/// that contain underscores survive intact.
fn env_provider() -> Env {
    Env::prefixed("DIRSCANNER_").map(|key| {
        key.as_str()
            .replacen("plugins_", "plugins.", 1)
            .replacen("logging_", "logging.", 1)
            .into()
    })
}
