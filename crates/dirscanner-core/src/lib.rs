// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the dirscanner framework.
//!
//! Provides the scan request and status model, the handler and reporter
//! traits plugins build on, the single-level [`ScanEngine`], and the batching
//! and delimited-output helpers used by index-mode handlers.

pub mod batch;
pub mod error;
pub mod guard;
pub mod index;
pub mod output;
pub mod scanner;
pub mod traits;
pub mod types;

pub use batch::{BatchRecord, INDEX_BATCH_SIZE, IndexBatch};
pub use error::DirScannerError;
pub use guard::FlushGuard;
pub use index::{IndexOutput, IndexRows};
pub use output::DelimitedWriter;
pub use scanner::ScanEngine;
pub use traits::{ProgressReporter, ScanHandler, ScanReporter};
pub use types::{ScanRequest, ScanRequestBuilder, ScanStatus, Verbosity};
