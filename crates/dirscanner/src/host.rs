// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The plugin implementations this binary knows about, and where it looks
//! for more.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dirscanner_config::DirScannerConfig;
use dirscanner_plugin::{DirScannerPlugin, EntryPointLoader, PluginCatalog};
use dirscanner_torrent::TorrentScannerPlugin;

use crate::cli::GlobalArgs;
use crate::orchestrator::HostSettings;

/// Plugins compiled in and always discovered.
pub fn builtin_catalog() -> PluginCatalog {
    PluginCatalog::new()
        .with(|| Arc::new(TorrentScannerPlugin::new()) as Arc<dyn DirScannerPlugin>)
}

/// Entry points external packages may name in their `plugin.toml`.
pub fn entry_point_loader() -> EntryPointLoader {
    let mut loader = EntryPointLoader::new();
    dirscanner_checksum::register_entry_points(&mut loader);
    loader
}

/// Command-line flags win over the application config.
pub fn settings(globals: &GlobalArgs, config: &DirScannerConfig) -> HostSettings {
    HostSettings {
        working_dir: PathBuf::from("."),
        ext_dir: globals
            .ext_dir
            .clone()
            .unwrap_or_else(|| config.plugins.ext_dir.clone()),
        config_override: globals
            .config
            .clone()
            .or_else(|| config.plugins.config_override.clone()),
        shutdown_timeout: Duration::from_secs(config.plugins.shutdown_timeout_secs),
    }
}

/// Log filter for the subscriber: `--log-level` over `logging.level`.
pub fn log_level<'a>(globals: &'a GlobalArgs, config: &'a DirScannerConfig) -> &'a str {
    globals
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_supplies_defaults() {
        let config = DirScannerConfig::default();
        let settings = settings(&GlobalArgs::default(), &config);
        assert_eq!(settings.ext_dir, PathBuf::from("ext"));
        assert_eq!(settings.config_override, None);
        assert_eq!(settings.shutdown_timeout, Duration::from_secs(30));
        assert_eq!(log_level(&GlobalArgs::default(), &config), "warn");
    }

    #[test]
    fn flags_override_config() {
        let mut config = DirScannerConfig::default();
        config.plugins.config_override = Some(PathBuf::from("/etc/from-config.toml"));
        config.plugins.shutdown_timeout_secs = 4;
        let globals = GlobalArgs {
            config: Some(PathBuf::from("flag.toml")),
            ext_dir: Some(PathBuf::from("/opt/ext")),
            no_color: true,
            log_level: Some("debug".into()),
        };

        let settings = settings(&globals, &config);
        assert_eq!(settings.ext_dir, PathBuf::from("/opt/ext"));
        assert_eq!(settings.config_override, Some(PathBuf::from("flag.toml")));
        assert_eq!(settings.shutdown_timeout, Duration::from_secs(4));
        assert_eq!(log_level(&globals, &config), "debug");
    }

    #[test]
    fn catalog_and_loader_cover_both_reference_plugins() {
        assert_eq!(builtin_catalog().len(), 1);
        assert_eq!(entry_point_loader().entry_names(), vec!["checksum"]);
    }
}
