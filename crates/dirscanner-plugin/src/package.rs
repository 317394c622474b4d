// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! External plugin packages.
//!
//! A package is a directory holding a `plugin.toml`:
//!
//! ```toml
//! [package]
//! name = "extras"
//! version = "1.2.0"
//! entries = ["checksum"]
//! ```
//!
//! Loading goes through [`PackageLoader`]. The default [`EntryPointLoader`]
//! resolves each entry against a host-supplied table of factories.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dirscanner_core::DirScannerError;
use serde::Deserialize;
use tracing::debug;

use crate::catalog::PluginFactory;
use crate::plugin::DirScannerPlugin;

/// File that marks a directory as a plugin package.
pub const PACKAGE_MANIFEST_FILE: &str = "plugin.toml";

/// Parsed `plugin.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManifest {
    pub name: String,
    pub version: semver::Version,
    pub entries: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageManifestFile {
    package: PackageSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PackageSection {
    name: String,
    version: String,
    #[serde(default)]
    entries: Vec<String>,
}

impl PackageManifest {
    /// Parse manifest text. `package` names the directory for error messages.
    pub fn parse(package: &Path, content: &str) -> Result<Self, DirScannerError> {
        let load_err = |message: String| DirScannerError::PluginLoad {
            package: package.to_path_buf(),
            message,
        };

        let file: PackageManifestFile =
            toml::from_str(content).map_err(|e| load_err(format!("invalid manifest: {e}")))?;
        let section = file.package;

        if section.name.trim().is_empty() {
            return Err(load_err("package name must not be empty".into()));
        }
        let version = semver::Version::parse(&section.version)
            .map_err(|e| load_err(format!("invalid version '{}': {e}", section.version)))?;
        if section.entries.is_empty() {
            return Err(load_err("package declares no entries".into()));
        }

        Ok(Self {
            name: section.name,
            version,
            entries: section.entries,
        })
    }

    /// Read and parse `<package>/plugin.toml`.
    pub fn read(package: &Path) -> Result<Self, DirScannerError> {
        let path = package.join(PACKAGE_MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| DirScannerError::PluginLoad {
            package: package.to_path_buf(),
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        Self::parse(package, &content)
    }
}

/// Turns a package directory into plugin instances.
///
/// Each call must hand out fresh instances; nothing is shared between packages.
pub trait PackageLoader: Send + Sync {
    fn load(&self, package: &Path) -> Result<Vec<Arc<dyn DirScannerPlugin>>, DirScannerError>;
}

/// Resolves manifest entries against a table of entry points known to the host.
#[derive(Clone, Default)]
pub struct EntryPointLoader {
    entries: HashMap<String, PluginFactory>,
}

impl EntryPointLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `entry` resolvable from package manifests.
    pub fn register<F>(&mut self, entry: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Arc<dyn DirScannerPlugin> + Send + Sync + 'static,
    {
        self.entries.insert(entry.into(), Arc::new(factory));
        self
    }

    pub fn with<F>(mut self, entry: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn DirScannerPlugin> + Send + Sync + 'static,
    {
        self.register(entry, factory);
        self
    }

    /// Known entry point names, sorted.
    pub fn entry_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl PackageLoader for EntryPointLoader {
    fn load(&self, package: &Path) -> Result<Vec<Arc<dyn DirScannerPlugin>>, DirScannerError> {
        let manifest = PackageManifest::read(package)?;
        debug!(
            package = %manifest.name,
            version = %manifest.version,
            entries = manifest.entries.len(),
            "loading plugin package"
        );

        // Resolve every entry before instantiating any, so a bad entry loads nothing.
        let factories = manifest
            .entries
            .iter()
            .map(|entry| {
                self.entries
                    .get(entry)
                    .ok_or_else(|| DirScannerError::PluginLoad {
                        package: package.to_path_buf(),
                        message: format!("unknown entry point '{entry}'"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(factories.into_iter().map(|factory| factory()).collect())
    }
}

impl std::fmt::Debug for EntryPointLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryPointLoader")
            .field("entries", &self.entry_names())
            .finish()
    }
}

/// Immediate subdirectories of `ext_dir` that contain a package manifest,
/// sorted by path.
pub fn find_packages(ext_dir: &Path) -> Result<Vec<PathBuf>, DirScannerError> {
    let entries = std::fs::read_dir(ext_dir).map_err(|e| DirScannerError::io(ext_dir, e))?;
    let mut packages = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DirScannerError::io(ext_dir, e))?;
        let path = entry.path();
        if path.is_dir() && path.join(PACKAGE_MANIFEST_FILE).is_file() {
            packages.push(path);
        }
    }
    packages.sort();
    Ok(packages)
}
