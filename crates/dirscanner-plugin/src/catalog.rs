// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static registration table for compiled-in plugins.
//!
//! The host fills a [`PluginCatalog`] at startup; discovery instantiates every
//! entry in registration order.

use std::sync::Arc;

use crate::plugin::DirScannerPlugin;

/// Builds a fresh plugin instance.
pub type PluginFactory = Arc<dyn Fn() -> Arc<dyn DirScannerPlugin> + Send + Sync>;

/// Append-only table of plugin factories.
#[derive(Clone, Default)]
pub struct PluginCatalog {
    factories: Vec<PluginFactory>,
}

impl PluginCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a factory. Order of registration is discovery order.
    pub fn register<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> Arc<dyn DirScannerPlugin> + Send + Sync + 'static,
    {
        self.factories.push(Arc::new(factory));
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn DirScannerPlugin> + Send + Sync + 'static,
    {
        self.register(factory);
        self
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// One new instance per registered factory, in registration order.
    pub fn instantiate(&self) -> Vec<Arc<dyn DirScannerPlugin>> {
        self.factories.iter().map(|factory| factory()).collect()
    }
}

impl std::fmt::Debug for PluginCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCatalog")
            .field("factories", &self.factories.len())
            .finish()
    }
}
