// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SHA-256 checksum plugin.
//!
//! Not compiled into the builtin catalog: hosts expose it as the `checksum`
//! entry point and it is loaded when a package under the external plugin
//! directory lists that entry.

use std::sync::Arc;

use dirscanner_plugin::{DirScannerPlugin, EntryPointLoader};

pub mod handler;
pub mod plugin;

pub use handler::{ChecksumHandler, FileDigest};
pub use plugin::{ChecksumConfig, ChecksumPlugin, ENTRY_POINT, PLUGIN_NAME, SCAN_COMMAND};

/// Make the `checksum` entry point resolvable by `loader`.
pub fn register_entry_points(loader: &mut EntryPointLoader) {
    loader.register(ENTRY_POINT, || {
        Arc::new(ChecksumPlugin::new()) as Arc<dyn DirScannerPlugin>
    });
}
