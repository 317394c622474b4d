// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progress and summary reporting traits.

use std::path::Path;

use crate::error::DirScannerError;
use crate::types::{ScanRequest, ScanStatus};

/// Receives one outcome per dispatched file, in dispatch order.
///
/// Implementations must bump exactly one counter of their [`ScanStatus`] per
/// call so that `processed + skipped + errored` equals the number of files the
/// engine dispatched.
pub trait ProgressReporter {
    /// The file was handled and any output was (or, in dry-run, would have been) written.
    fn report_processed(&mut self, file: &Path, message: &str);

    /// The file was deliberately left alone, typically because its output already exists.
    fn report_skipped(&mut self, file: &Path, message: &str);

    /// The file could not be handled. The scan continues.
    fn report_errored(
        &mut self,
        file: &Path,
        message: &str,
        cause: Option<&(dyn std::error::Error + 'static)>,
    );

    /// Current counters.
    fn status(&self) -> &ScanStatus;
}

/// Invocation-level reporting: start banner, fatal failure, and final summary.
pub trait ScanReporter {
    fn report_start(&mut self, request: &ScanRequest);

    fn report_failure(&mut self, error: &DirScannerError);

    /// Prints the summary and returns the process exit code: `1` if any file
    /// errored or the scan failed, `0` otherwise.
    fn report_complete(&mut self) -> i32;
}
