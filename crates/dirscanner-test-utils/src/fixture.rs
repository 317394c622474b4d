// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary directory layout for scan tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dirscanner_config::ConfigurationResolver;
use tempfile::TempDir;

/// A temp root holding `scan/`, `out/`, `work/`, and `ext/` directories.
///
/// Everything is removed when the fixture is dropped.
#[derive(Debug)]
pub struct ScanFixture {
    root: TempDir,
}

impl ScanFixture {
    pub fn new() -> std::io::Result<Self> {
        let root = tempfile::tempdir()?;
        for dir in ["scan", "out", "work", "ext"] {
            fs::create_dir_all(root.path().join(dir))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn scan_dir(&self) -> PathBuf {
        self.root.path().join("scan")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn ext_dir(&self) -> PathBuf {
        self.root.path().join("ext")
    }

    /// Write `contents` to `scan/<name>` and return the path.
    pub fn add_file(&self, name: &str, contents: impl AsRef<[u8]>) -> std::io::Result<PathBuf> {
        let path = self.scan_dir().join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write `<name>.toml` plugin config into the work directory.
    pub fn add_plugin_config(&self, plugin: &str, toml: &str) -> std::io::Result<PathBuf> {
        let path = self.work_dir().join(format!("{plugin}.toml"));
        fs::write(&path, toml)?;
        Ok(path)
    }

    /// Create `ext/<dir>/plugin.toml` declaring the given entry points.
    pub fn add_package(
        &self,
        dir: &str,
        version: &str,
        entries: &[&str],
    ) -> std::io::Result<PathBuf> {
        let package = self.ext_dir().join(dir);
        fs::create_dir_all(&package)?;
        let entries = entries
            .iter()
            .map(|e| format!("\"{e}\""))
            .collect::<Vec<_>>()
            .join(", ");
        fs::write(
            package.join("plugin.toml"),
            format!("[package]\nname = \"{dir}\"\nversion = \"{version}\"\nentries = [{entries}]\n"),
        )?;
        Ok(package)
    }

    /// Resolver rooted at `work/` and `ext/`.
    pub fn resolver(&self) -> Arc<ConfigurationResolver> {
        Arc::new(ConfigurationResolver::new(self.work_dir(), self.ext_dir()))
    }
}
