// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-plugin handler strategy driven by the scan engine.

use std::path::Path;

use crate::error::DirScannerError;
use crate::traits::reporter::ProgressReporter;
use crate::types::ScanRequest;

/// Decides which files a plugin wants and what to do with each of them.
///
/// The engine matches immediate children of the target directory against
/// [`search_glob`](ScanHandler::search_glob), narrows them with
/// [`filter`](ScanHandler::filter), and calls
/// [`handle_matched`](ScanHandler::handle_matched) once per candidate.
///
/// Per-file failures (unparsable input, failed write) belong to the handler:
/// report them through the reporter as errored and return `Ok(())`. An `Err`
/// returned from `handle_matched` aborts the rest of the scan.
pub trait ScanHandler: Send {
    /// Glob matched against each entry's file name, e.g. `*.torrent`.
    fn search_glob(&self) -> &str;

    /// Extra predicate applied after the glob. Defaults to regular files only.
    fn filter(&self, path: &Path) -> bool {
        path.is_file()
    }

    /// Process one matched file and report exactly one outcome for it.
    fn handle_matched(
        &mut self,
        request: &ScanRequest,
        reporter: &mut dyn ProgressReporter,
        file: &Path,
    ) -> Result<(), DirScannerError>;

    /// Write out anything still buffered. Must run once after every scan in
    /// index mode; [`FlushGuard`](crate::guard::FlushGuard) takes care of that.
    fn flush(&mut self, request: &ScanRequest) -> Result<(), DirScannerError> {
        let _ = request;
        Ok(())
    }
}
