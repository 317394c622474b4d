// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the dirscanner framework.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error source carried by several variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The primary error type used by the scan engine, handlers, and plugin system.
#[derive(Debug, Error)]
pub enum DirScannerError {
    /// The caller asked for something that cannot work (bad scan target, missing argument).
    #[error("usage error: {0}")]
    Usage(String),

    /// A handler supplied a glob the engine could not compile.
    #[error("invalid search glob `{glob}`: {message}")]
    InvalidGlob { glob: String, message: String },

    /// Filesystem failure outside a single file's processing.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be parsed by a handler.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// An output artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// An index write pass failed. `pending` records are still buffered and
    /// have not reached the index.
    #[error("index {} is incomplete, {pending} records not written: {source}", path.display())]
    IndexIncomplete {
        path: PathBuf,
        pending: usize,
        #[source]
        source: Box<DirScannerError>,
    },

    /// Generic failure raised by a plugin.
    #[error("plugin error: {message}")]
    Plugin {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// A plugin failed during bring-up. Names the offending plugin.
    #[error("failed to initialize plugin {plugin}: {source}")]
    PluginInit {
        plugin: String,
        #[source]
        source: Box<DirScannerError>,
    },

    /// An external plugin package could not be loaded.
    #[error("failed to load plugin package {}: {message}", package.display())]
    PluginLoad { package: PathBuf, message: String },

    /// Configuration errors (invalid TOML, bad values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DirScannerError {
    /// Convenience constructor for plugin failures without an underlying cause.
    pub fn plugin(message: impl Into<String>) -> Self {
        Self::Plugin {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps an `io::Error` with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
