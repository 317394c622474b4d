// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-plugin configuration lookup.
//!
//! A plugin's config lives in `<plugin name>.toml`. Candidates are tried in
//! priority order:
//!
//! 1. the global override path, if one is set
//! 2. `<working dir>/<plugin name>.toml`
//! 3. `<external plugin dir>/<plugin name>.toml`
//!
//! The first candidate that exists, is a regular file, and deserializes into
//! the requested type wins. Lookup never fails: a candidate that does not parse
//! is logged and skipped, and running out of candidates yields
//! [`ConfigLookup::Absent`]. Whether missing config is fatal is the plugin's call.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::Figment;
use figment::providers::{Format, Toml};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// File extension of per-plugin config documents.
pub const CONFIG_EXTENSION: &str = "toml";

/// Outcome of a configuration lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLookup<T> {
    /// Config was found and parsed.
    Found { value: T, source: PathBuf },
    /// No candidate produced a usable config.
    Absent,
}

impl<T> ConfigLookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, ConfigLookup::Found { .. })
    }

    /// The file the value was read from.
    pub fn source(&self) -> Option<&Path> {
        match self {
            ConfigLookup::Found { source, .. } => Some(source),
            ConfigLookup::Absent => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            ConfigLookup::Found { value, .. } => Some(value),
            ConfigLookup::Absent => None,
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.into_option().unwrap_or_default()
    }
}

/// Resolves plugin config documents from the layered locations above.
#[derive(Debug, Clone)]
pub struct ConfigurationResolver {
    working_dir: PathBuf,
    ext_dir: PathBuf,
    override_path: Option<PathBuf>,
}

impl ConfigurationResolver {
    pub fn new(working_dir: impl Into<PathBuf>, ext_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ext_dir: ext_dir.into(),
            override_path: None,
        }
    }

    /// Consult `path` before the conventional locations for every plugin.
    pub fn with_override(mut self, path: Option<PathBuf>) -> Self {
        self.override_path = path;
        self
    }

    pub fn override_path(&self) -> Option<&Path> {
        self.override_path.as_deref()
    }

    pub fn ext_dir(&self) -> &Path {
        &self.ext_dir
    }

    /// Candidate paths for `plugin_name`, highest priority first.
    pub fn candidates(&self, plugin_name: &str) -> Vec<PathBuf> {
        let file_name = config_file_name(plugin_name);
        self.override_path
            .iter()
            .cloned()
            .chain([
                self.working_dir.join(&file_name),
                self.ext_dir.join(&file_name),
            ])
            .collect()
    }

    /// First candidate for `plugin_name` that exists, is a regular file, and
    /// deserializes into `T`.
    pub fn resolve<T: DeserializeOwned>(&self, plugin_name: &str) -> ConfigLookup<T> {
        for candidate in self.candidates(plugin_name) {
            if !candidate.exists() {
                continue;
            }
            if let found @ ConfigLookup::Found { .. } = self.resolve_from_path::<T>(&candidate) {
                debug!(
                    plugin = plugin_name,
                    source = %candidate.display(),
                    "loaded plugin configuration"
                );
                return found;
            }
        }
        debug!(plugin = plugin_name, "no plugin configuration found");
        ConfigLookup::Absent
    }

    /// Deserialize `T` from an explicit path, bypassing the naming convention.
    pub fn resolve_from_path<T: DeserializeOwned>(&self, path: &Path) -> ConfigLookup<T> {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(_) => {
                debug!(path = %path.display(), "configuration file does not exist");
                return ConfigLookup::Absent;
            }
        };
        if !meta.is_file() {
            warn!(path = %path.display(), "configuration path is not a regular file");
            return ConfigLookup::Absent;
        }

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read configuration");
                return ConfigLookup::Absent;
            }
        };

        match Figment::from(Toml::string(&raw)).extract::<T>() {
            Ok(value) => ConfigLookup::Found {
                value,
                source: path.to_path_buf(),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to parse configuration, skipping");
                ConfigLookup::Absent
            }
        }
    }

    /// True iff any candidate exists as a regular file. Does not parse.
    pub fn exists(&self, plugin_name: &str) -> bool {
        self.candidates(plugin_name).iter().any(|p| p.is_file())
    }

    /// Where config for `plugin_name` is expected by default: the override if
    /// set, else the working-directory location. Does not touch the filesystem.
    pub fn expected_path(&self, plugin_name: &str) -> PathBuf {
        match &self.override_path {
            Some(path) => path.clone(),
            None => self.working_dir.join(config_file_name(plugin_name)),
        }
    }
}

/// A resolver handle pre-bound to one plugin's name.
#[derive(Debug, Clone)]
pub struct ScopedConfig {
    resolver: Arc<ConfigurationResolver>,
    plugin_name: String,
}

impl ScopedConfig {
    pub fn new(resolver: Arc<ConfigurationResolver>, plugin_name: impl Into<String>) -> Self {
        Self {
            resolver,
            plugin_name: plugin_name.into(),
        }
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    pub fn resolve<T: DeserializeOwned>(&self) -> ConfigLookup<T> {
        self.resolver.resolve(&self.plugin_name)
    }

    pub fn resolve_from_path<T: DeserializeOwned>(&self, path: &Path) -> ConfigLookup<T> {
        self.resolver.resolve_from_path(path)
    }

    pub fn exists(&self) -> bool {
        self.resolver.exists(&self.plugin_name)
    }

    pub fn expected_path(&self) -> PathBuf {
        self.resolver.expected_path(&self.plugin_name)
    }
}

fn config_file_name(plugin_name: &str) -> String {
    format!("{plugin_name}.{CONFIG_EXTENSION}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        label: String,
        #[serde(default)]
        limit: u32,
    }

    struct Fixture {
        _root: tempfile::TempDir,
        work: PathBuf,
        ext: PathBuf,
    }

    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let work = root.path().join("work");
        let ext = root.path().join("ext");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir_all(&ext).unwrap();
        Fixture {
            _root: root,
            work,
            ext,
        }
    }

    #[test]
    fn absent_when_nothing_exists() {
        let f = fixture();
        let resolver = ConfigurationResolver::new(&f.work, &f.ext);
        assert_eq!(resolver.resolve::<Sample>("scanner"), ConfigLookup::Absent);
        assert!(!resolver.exists("scanner"));
    }

    #[test]
    fn working_dir_beats_ext_dir() {
        let f = fixture();
        fs::write(f.work.join("scanner.toml"), "label = \"work\"").unwrap();
        fs::write(f.ext.join("scanner.toml"), "label = \"ext\"").unwrap();

        let resolver = ConfigurationResolver::new(&f.work, &f.ext);
        let lookup = resolver.resolve::<Sample>("scanner");
        assert_eq!(lookup.source(), Some(f.work.join("scanner.toml").as_path()));
        assert_eq!(lookup.into_option().unwrap().label, "work");
    }

    #[test]
    fn override_beats_everything() {
        let f = fixture();
        let override_path = f.work.join("custom.toml");
        fs::write(&override_path, "label = \"override\"\nlimit = 3").unwrap();
        fs::write(f.work.join("scanner.toml"), "label = \"work\"").unwrap();

        let resolver =
            ConfigurationResolver::new(&f.work, &f.ext).with_override(Some(override_path));
        let value = resolver.resolve::<Sample>("scanner").into_option().unwrap();
        assert_eq!(
            value,
            Sample {
                label: "override".into(),
                limit: 3
            }
        );
    }

    #[test]
    fn unparsable_candidate_falls_through() {
        let f = fixture();
        fs::write(f.work.join("scanner.toml"), "label = [unterminated").unwrap();
        fs::write(f.ext.join("scanner.toml"), "label = \"ext\"").unwrap();

        let resolver = ConfigurationResolver::new(&f.work, &f.ext);
        let lookup = resolver.resolve::<Sample>("scanner");
        assert_eq!(lookup.into_option().unwrap().label, "ext");
    }

    #[test]
    fn wrong_shape_degrades_to_absent() {
        let f = fixture();
        fs::write(f.work.join("scanner.toml"), "limit = \"many\"").unwrap();
        let resolver = ConfigurationResolver::new(&f.work, &f.ext);
        assert!(!resolver.resolve::<Sample>("scanner").is_found());
        // exists() does not parse
        assert!(resolver.exists("scanner"));
    }

    #[test]
    fn directory_candidate_is_skipped() {
        let f = fixture();
        fs::create_dir(f.work.join("scanner.toml")).unwrap();
        fs::write(f.ext.join("scanner.toml"), "label = \"ext\"").unwrap();

        let resolver = ConfigurationResolver::new(&f.work, &f.ext);
        assert_eq!(resolver.resolve::<Sample>("scanner").into_option().unwrap().label, "ext");
        assert!(resolver.exists("scanner"));
        fs::remove_file(f.ext.join("scanner.toml")).unwrap();
        assert!(!resolver.exists("scanner"));
    }

    #[test]
    fn expected_path_ignores_existence() {
        let f = fixture();
        fs::write(f.ext.join("scanner.toml"), "label = \"ext\"").unwrap();
        let resolver = ConfigurationResolver::new(&f.work, &f.ext);
        assert_eq!(resolver.expected_path("scanner"), f.work.join("scanner.toml"));

        let resolver = resolver.with_override(Some(PathBuf::from("/etc/custom.toml")));
        assert_eq!(resolver.expected_path("scanner"), PathBuf::from("/etc/custom.toml"));
    }

    #[test]
    fn resolve_from_path_uses_same_contract() {
        let f = fixture();
        let path = f.work.join("elsewhere.toml");
        fs::write(&path, "label = \"direct\"").unwrap();
        let resolver = ConfigurationResolver::new(&f.work, &f.ext);
        assert_eq!(
            resolver.resolve_from_path::<Sample>(&path).into_option().unwrap().label,
            "direct"
        );
        assert!(!resolver
            .resolve_from_path::<Sample>(&f.work.join("missing.toml"))
            .is_found());
    }

    #[test]
    fn scoped_config_binds_plugin_name() {
        let f = fixture();
        fs::write(f.ext.join("checksum.toml"), "label = \"bound\"").unwrap();
        let resolver = Arc::new(ConfigurationResolver::new(&f.work, &f.ext));
        let scoped = ScopedConfig::new(resolver, "checksum");
        assert!(scoped.exists());
        assert_eq!(scoped.plugin_name(), "checksum");
        assert_eq!(scoped.resolve::<Sample>().unwrap_or_default().label, "bound");
        assert_eq!(scoped.expected_path(), f.work.join("checksum.toml"));
    }
}
