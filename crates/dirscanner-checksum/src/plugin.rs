// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::OnceLock;

use async_trait::async_trait;
use dirscanner_core::{DirScannerError, ScanHandler};
use dirscanner_plugin::{CommandDescriptor, DirScannerPlugin, PluginContext, PluginDescriptor};
use serde::Deserialize;
use tracing::{debug, info};

use crate::handler::ChecksumHandler;

pub const PLUGIN_NAME: &str = "checksum";
/// Name under which hosts register this plugin for package manifests.
pub const ENTRY_POINT: &str = "checksum";
pub const SCAN_COMMAND: &str = "scan-checksums";
const DESCRIPTION: &str = "Records SHA-256 checksums of files in a directory to CSV";

/// Optional `checksum.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChecksumConfig {
    /// File-name glob selecting files to hash.
    pub pattern: String,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            pattern: "*".to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ChecksumPlugin {
    config: OnceLock<ChecksumConfig>,
}

impl ChecksumPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> ChecksumConfig {
        self.config.get().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DirScannerPlugin for ChecksumPlugin {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new(PLUGIN_NAME, DESCRIPTION)
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_author("Dirscanner Contributors")
    }

    async fn initialize(&self, context: PluginContext) -> Result<(), DirScannerError> {
        let config = context.config().resolve::<ChecksumConfig>().unwrap_or_default();
        if config.pattern.trim().is_empty() {
            return Err(DirScannerError::Config(
                "checksum: pattern must not be empty".to_string(),
            ));
        }
        debug!(pattern = %config.pattern, "checksum pattern");
        self.config
            .set(config)
            .map_err(|_| DirScannerError::plugin("checksum initialized twice"))?;
        info!("checksum initialized");
        Ok(())
    }

    fn command_descriptors(&self) -> Vec<CommandDescriptor> {
        vec![CommandDescriptor::new(SCAN_COMMAND, DESCRIPTION, PLUGIN_NAME)]
    }

    fn create_handler(&self) -> Result<Box<dyn ScanHandler>, DirScannerError> {
        Ok(Box::new(ChecksumHandler::new(self.config().pattern)))
    }
}
