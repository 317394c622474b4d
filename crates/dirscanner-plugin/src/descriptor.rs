// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin identity and command metadata.

use std::fmt;

use dirscanner_core::DirScannerError;
use serde::{Deserialize, Serialize};

/// Version assigned when a plugin does not declare one.
pub const DEFAULT_PLUGIN_VERSION: &str = "1.0.0";

/// Immutable identity of a plugin. `name` is the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub author: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl PluginDescriptor {
    /// An enabled descriptor with the default version and no author.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            version: DEFAULT_PLUGIN_VERSION.to_string(),
            author: String::new(),
            enabled: true,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Mark the plugin as disabled: it stays visible in discovery listings but
    /// is never registered.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Name and description must be non-blank.
    pub fn validate(&self) -> Result<(), DirScannerError> {
        if self.name.trim().is_empty() {
            return Err(DirScannerError::plugin("plugin name must not be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(DirScannerError::plugin(format!(
                "plugin {}: description must not be empty",
                self.name
            )));
        }
        Ok(())
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{} - {}", self.name, self.version, self.description)
    }
}

fn default_enabled() -> bool {
    true
}

/// A command a plugin contributes to the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Subcommand name, e.g. `scan-torrents`.
    pub name: String,
    /// One-line help text.
    pub about: String,
    /// Name of the contributing plugin.
    pub plugin: String,
}

impl CommandDescriptor {
    pub fn new(
        name: impl Into<String>,
        about: impl Into<String>,
        plugin: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            about: about.into(),
            plugin: plugin.into(),
        }
    }
}
