// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Torrent scanner plugin: exports the file listing of every `.torrent` in a
//! directory to CSV, either one file per torrent or one shared index.

pub mod config;
pub mod handler;
pub mod parser;
pub mod plugin;

pub use config::TorrentConfig;
pub use handler::TorrentHandler;
pub use parser::{TorrentFile, TorrentMetadata};
pub use plugin::{PLUGIN_NAME, SCAN_COMMAND, TorrentScannerPlugin};
