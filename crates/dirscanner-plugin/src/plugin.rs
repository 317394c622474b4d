// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The extension surface every scanner plugin implements.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dirscanner_core::{DirScannerError, ScanHandler};

use crate::context::PluginContext;
use crate::descriptor::{CommandDescriptor, PluginDescriptor};

/// A scanner plugin.
///
/// Plugins are shared behind `Arc` between the registry and the shutdown tasks,
/// so every method takes `&self`; implementations keep mutable state behind
/// interior mutability.
#[async_trait]
pub trait DirScannerPlugin: Send + Sync + 'static {
    /// Identity of this plugin. Called once at discovery.
    fn descriptor(&self) -> PluginDescriptor;

    /// Called once before any handler is created. The context stays valid
    /// until [`shutdown`](Self::shutdown) returns.
    async fn initialize(&self, context: PluginContext) -> Result<(), DirScannerError>;

    /// Release resources. The lifecycle manager abandons the call after
    /// `timeout`.
    async fn shutdown(&self, timeout: Duration) -> Result<(), DirScannerError> {
        let _ = timeout;
        Ok(())
    }

    /// CLI commands contributed by this plugin.
    fn command_descriptors(&self) -> Vec<CommandDescriptor>;

    /// A fresh handler for one scan.
    fn create_handler(&self) -> Result<Box<dyn ScanHandler>, DirScannerError>;
}

/// Where a registered plugin came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSource {
    /// Compiled in and registered through the [`PluginCatalog`](crate::PluginCatalog).
    Builtin,
    /// Loaded from the package directory at this path.
    External(PathBuf),
}

impl std::fmt::Display for PluginSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginSource::Builtin => write!(f, "builtin"),
            PluginSource::External(path) => write!(f, "external ({})", path.display()),
        }
    }
}

/// A registered plugin together with its descriptor and source.
#[derive(Clone)]
pub struct PluginInstance {
    pub descriptor: PluginDescriptor,
    pub plugin: Arc<dyn DirScannerPlugin>,
    pub source: PluginSource,
}

impl PluginInstance {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

impl std::fmt::Debug for PluginInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginInstance")
            .field("descriptor", &self.descriptor)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
