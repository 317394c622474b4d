// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use dirscanner_core::{DelimitedWriter, DirScannerError, ScanHandler};
use dirscanner_plugin::{CommandDescriptor, DirScannerPlugin, PluginContext, PluginDescriptor};
use tracing::{debug, info};

use crate::config::TorrentConfig;
use crate::handler::TorrentHandler;

pub const PLUGIN_NAME: &str = "torrentscanner";
pub const SCAN_COMMAND: &str = "scan-torrents";
const DESCRIPTION: &str = "Scans directories for .torrent files and exports their metadata to CSV format";

/// Builtin plugin wrapping [`TorrentHandler`].
#[derive(Debug, Default)]
pub struct TorrentScannerPlugin {
    context: OnceLock<PluginContext>,
    config: OnceLock<TorrentConfig>,
}

impl TorrentScannerPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective configuration; defaults until initialized.
    pub fn config(&self) -> TorrentConfig {
        self.config.get().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DirScannerPlugin for TorrentScannerPlugin {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new(PLUGIN_NAME, DESCRIPTION)
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_author("Dirscanner Contributors")
    }

    async fn initialize(&self, context: PluginContext) -> Result<(), DirScannerError> {
        let lookup = context.config().resolve::<TorrentConfig>();
        match lookup.source() {
            Some(source) => debug!(source = %source.display(), "using torrentscanner config"),
            None => debug!(
                expected = %context.config().expected_path().display(),
                "no torrentscanner config, using defaults"
            ),
        }

        self.config
            .set(lookup.unwrap_or_default())
            .map_err(|_| DirScannerError::plugin("torrentscanner initialized twice"))?;
        self.context
            .set(context)
            .map_err(|_| DirScannerError::plugin("torrentscanner initialized twice"))?;
        info!(version = env!("CARGO_PKG_VERSION"), "torrentscanner initialized");
        Ok(())
    }

    async fn shutdown(&self, _timeout: Duration) -> Result<(), DirScannerError> {
        if self.context.get().is_some() {
            info!("shutting down torrentscanner");
        }
        Ok(())
    }

    fn command_descriptors(&self) -> Vec<CommandDescriptor> {
        vec![CommandDescriptor::new(SCAN_COMMAND, DESCRIPTION, PLUGIN_NAME)]
    }

    fn create_handler(&self) -> Result<Box<dyn ScanHandler>, DirScannerError> {
        let writer = DelimitedWriter::with_delimiter(self.config().delimiter_byte());
        Ok(Box::new(TorrentHandler::with_writer(writer)))
    }
}
