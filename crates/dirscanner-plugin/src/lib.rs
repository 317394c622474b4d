// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin system for dirscanner.
//!
//! Plugins are discovered from a static [`PluginCatalog`] and from external
//! packages, registered by name in a [`PluginRegistry`], and driven through
//! initialize and shutdown by the [`PluginLifecycleManager`].

pub mod catalog;
pub mod context;
pub mod descriptor;
pub mod lifecycle;
pub mod package;
pub mod plugin;
pub mod registry;

pub use catalog::{PluginCatalog, PluginFactory};
pub use context::PluginContext;
pub use descriptor::{CommandDescriptor, DEFAULT_PLUGIN_VERSION, PluginDescriptor};
pub use lifecycle::{
    DEFAULT_SHUTDOWN_TIMEOUT, PluginLifecycleManager, PluginState, ShutdownOutcome,
};
pub use package::{EntryPointLoader, PACKAGE_MANIFEST_FILE, PackageLoader, PackageManifest};
pub use plugin::{DirScannerPlugin, PluginInstance, PluginSource};
pub use registry::{DiscoveryRecord, DiscoveryStatus, PackageFailure, PluginRegistry};
