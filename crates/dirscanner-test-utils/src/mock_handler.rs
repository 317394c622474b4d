// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scan handler with outcomes driven by file names.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dirscanner_core::{DirScannerError, ProgressReporter, ScanHandler, ScanRequest};

/// Reports `skip-*` files as skipped, `bad-*` files as errored, `abort-*`
/// files by returning an error, and everything else as processed.
///
/// Dispatched paths and flush calls are shared through `Arc` so they remain
/// visible after the handler is boxed and handed to the engine.
#[derive(Debug, Clone)]
pub struct MockHandler {
    glob: String,
    dispatched: Arc<Mutex<Vec<PathBuf>>>,
    flushes: Arc<Mutex<usize>>,
}

impl MockHandler {
    pub fn new(glob: impl Into<String>) -> Self {
        Self {
            glob: glob.into(),
            dispatched: Arc::new(Mutex::new(Vec::new())),
            flushes: Arc::new(Mutex::new(0)),
        }
    }

    pub fn dispatched(&self) -> Vec<PathBuf> {
        self.dispatched.lock().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.lock().map(|n| *n).unwrap_or_default()
    }
}

impl ScanHandler for MockHandler {
    fn search_glob(&self) -> &str {
        &self.glob
    }

    fn handle_matched(
        &mut self,
        _request: &ScanRequest,
        reporter: &mut dyn ProgressReporter,
        file: &Path,
    ) -> Result<(), DirScannerError> {
        if let Ok(mut dispatched) = self.dispatched.lock() {
            dispatched.push(file.to_path_buf());
        }
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if name.starts_with("abort-") {
            return Err(DirScannerError::Internal(format!("aborted on {name}")));
        }
        if name.starts_with("skip-") {
            reporter.report_skipped(file, "skipped by mock");
        } else if name.starts_with("bad-") {
            let cause = DirScannerError::Parse {
                path: file.to_path_buf(),
                message: "mock parse failure".into(),
            };
            reporter.report_errored(file, "mock failure", Some(&cause));
        } else {
            reporter.report_processed(file, "handled by mock");
        }
        Ok(())
    }

    fn flush(&mut self, _request: &ScanRequest) -> Result<(), DirScannerError> {
        if let Ok(mut flushes) = self.flushes.lock() {
            *flushes += 1;
        }
        Ok(())
    }
}
