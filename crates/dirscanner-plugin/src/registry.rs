// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin discovery and the registry of active plugins.
//!
//! Discovery runs in two phases: builtin plugins from the [`PluginCatalog`],
//! then external packages found under the configured directory. Disabled
//! plugins are listed but never registered. When two plugins share a name the
//! first one registered wins, so builtins always shadow external plugins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::PluginCatalog;
use crate::descriptor::{CommandDescriptor, PluginDescriptor};
use crate::package::{PackageLoader, find_packages};
use crate::plugin::{DirScannerPlugin, PluginInstance, PluginSource};

/// What discovery did with one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryStatus {
    Registered,
    Disabled,
    /// Another plugin with the same name was registered first.
    Duplicate,
    /// The descriptor failed validation.
    Invalid,
}

impl std::fmt::Display for DiscoveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscoveryStatus::Registered => write!(f, "registered"),
            DiscoveryStatus::Disabled => write!(f, "disabled"),
            DiscoveryStatus::Duplicate => write!(f, "duplicate"),
            DiscoveryStatus::Invalid => write!(f, "invalid"),
        }
    }
}

/// One entry of the raw discovery listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRecord {
    pub descriptor: PluginDescriptor,
    pub source: PluginSource,
    pub status: DiscoveryStatus,
}

/// An external package that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFailure {
    pub package: PathBuf,
    pub message: String,
}

/// Registry of discovered plugins, keyed by name, in registration order.
pub struct PluginRegistry {
    catalog: PluginCatalog,
    external: Option<(PathBuf, Box<dyn PackageLoader>)>,
    instances: Vec<PluginInstance>,
    by_name: HashMap<String, usize>,
    discovered: Vec<DiscoveryRecord>,
    failures: Vec<PackageFailure>,
}

impl PluginRegistry {
    /// A registry that discovers builtin plugins only.
    pub fn new(catalog: PluginCatalog) -> Self {
        Self {
            catalog,
            external: None,
            instances: Vec::new(),
            by_name: HashMap::new(),
            discovered: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Also discover packages under `ext_dir` through `loader`.
    pub fn with_external_dir(
        mut self,
        ext_dir: impl Into<PathBuf>,
        loader: impl PackageLoader + 'static,
    ) -> Self {
        self.external = Some((ext_dir.into(), Box::new(loader)));
        self
    }

    /// Run both discovery phases. Returns the number of newly registered plugins.
    ///
    /// Never fails: package load failures are logged and collected in
    /// [`package_failures`](Self::package_failures).
    pub fn discover(&mut self) -> usize {
        let before = self.instances.len();

        for plugin in self.catalog.instantiate() {
            self.register(plugin, PluginSource::Builtin);
        }

        if let Some((ext_dir, loader)) = self.external.take() {
            self.discover_external(&ext_dir, loader.as_ref());
            self.external = Some((ext_dir, loader));
        }

        let added = self.instances.len() - before;
        info!(
            registered = added,
            total = self.instances.len(),
            "plugin discovery complete"
        );
        added
    }

    fn discover_external(&mut self, ext_dir: &Path, loader: &dyn PackageLoader) {
        if !ext_dir.is_dir() {
            debug!(path = %ext_dir.display(), "external plugin directory not found, skipping");
            return;
        }

        let packages = match find_packages(ext_dir) {
            Ok(packages) => packages,
            Err(e) => {
                warn!(path = %ext_dir.display(), error = %e, "cannot list external plugin directory");
                return;
            }
        };

        for package in packages {
            match loader.load(&package) {
                Ok(plugins) => {
                    for plugin in plugins {
                        self.register(plugin, PluginSource::External(package.clone()));
                    }
                }
                Err(e) => {
                    warn!(package = %package.display(), error = %e, "failed to load plugin package");
                    self.failures.push(PackageFailure {
                        package,
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    /// Apply the registration rules to one plugin and record the outcome.
    pub fn register(
        &mut self,
        plugin: Arc<dyn DirScannerPlugin>,
        source: PluginSource,
    ) -> DiscoveryStatus {
        let descriptor = plugin.descriptor();
        let status = if let Err(e) = descriptor.validate() {
            warn!(source = %source, error = %e, "ignoring plugin with invalid descriptor");
            DiscoveryStatus::Invalid
        } else if !descriptor.enabled {
            info!(plugin = %descriptor.name, source = %source, "plugin disabled, not registering");
            DiscoveryStatus::Disabled
        } else if self.by_name.contains_key(&descriptor.name) {
            warn!(
                plugin = %descriptor.name,
                source = %source,
                "plugin name conflict, keeping the first registration"
            );
            DiscoveryStatus::Duplicate
        } else {
            debug!(plugin = %descriptor.name, source = %source, "registered plugin");
            self.by_name
                .insert(descriptor.name.clone(), self.instances.len());
            self.instances.push(PluginInstance {
                descriptor: descriptor.clone(),
                plugin,
                source: source.clone(),
            });
            DiscoveryStatus::Registered
        };

        self.discovered.push(DiscoveryRecord {
            descriptor,
            source,
            status,
        });
        status
    }

    /// Registered plugins in registration order.
    pub fn all(&self) -> &[PluginInstance] {
        &self.instances
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn DirScannerPlugin>> {
        self.get(name).map(|instance| Arc::clone(&instance.plugin))
    }

    pub fn get(&self, name: &str) -> Option<&PluginInstance> {
        self.by_name.get(name).map(|&i| &self.instances[i])
    }

    /// Everything discovery saw, including disabled and duplicate plugins.
    pub fn discovered(&self) -> &[DiscoveryRecord] {
        &self.discovered
    }

    pub fn package_failures(&self) -> &[PackageFailure] {
        &self.failures
    }

    pub fn names(&self) -> Vec<&str> {
        self.instances.iter().map(PluginInstance::name).collect()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Commands of all registered plugins, in registration order.
    pub fn command_descriptors(&self) -> Vec<CommandDescriptor> {
        self.instances
            .iter()
            .flat_map(|instance| instance.plugin.command_descriptors())
            .collect()
    }

    /// Drop every registered instance. The discovery listing is kept.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.by_name.clear();
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("catalog", &self.catalog)
            .field("ext_dir", &self.external.as_ref().map(|(dir, _)| dir))
            .field("plugins", &self.names())
            .finish()
    }
}
