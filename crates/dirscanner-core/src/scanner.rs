// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-level directory scan and sequential dispatch.
//!
//! The engine enumerates the immediate children of the request's directory,
//! keeps the ones the handler's glob and filter accept, and hands them to the
//! handler one at a time. Subdirectories are never descended into.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, info};

use crate::error::DirScannerError;
use crate::guard::FlushGuard;
use crate::traits::{ProgressReporter, ScanHandler};
use crate::types::ScanRequest;

/// Walks one directory level and dispatches matches into a [`ScanHandler`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanEngine;

impl ScanEngine {
    pub fn new() -> Self {
        Self
    }

    /// Scan `request.directory()` and dispatch every candidate to `handler`.
    ///
    /// Fails up front if the target is missing or not a directory. Errors
    /// returned by the handler abort the remaining dispatch and are returned
    /// as-is. On success returns the number of files dispatched.
    pub fn scan(
        &self,
        request: &ScanRequest,
        handler: &mut dyn ScanHandler,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<usize, DirScannerError> {
        let candidates = self.find_candidates(request.directory(), handler)?;

        info!(
            directory = %request.directory().display(),
            glob = handler.search_glob(),
            matched = candidates.len(),
            index_mode = request.is_index_mode(),
            dry_run = request.is_dry_run(),
            "dispatching matched files"
        );

        for file in &candidates {
            debug!(file = %file.display(), "dispatch");
            handler.handle_matched(request, reporter, file)?;
        }

        Ok(candidates.len())
    }

    /// [`scan`](Self::scan), then flush the handler. The flush also runs when
    /// the scan returns early with an error.
    pub fn scan_and_flush(
        &self,
        request: &ScanRequest,
        handler: &mut dyn ScanHandler,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<usize, DirScannerError> {
        let mut guard = FlushGuard::new(handler, request);
        let dispatched = self.scan(request, guard.handler(), reporter)?;
        guard.finish()?;
        Ok(dispatched)
    }

    /// Immediate children of `directory` accepted by the handler's glob and
    /// filter, in directory-iteration order.
    pub fn find_candidates(
        &self,
        directory: &Path,
        handler: &dyn ScanHandler,
    ) -> Result<Vec<PathBuf>, DirScannerError> {
        validate_directory(directory)?;
        let matcher = compile_glob(handler.search_glob())?;

        let entries =
            fs::read_dir(directory).map_err(|e| DirScannerError::io(directory, e))?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DirScannerError::io(directory, e))?;
            let name = entry.file_name();
            if !matcher.is_match(Path::new(&name)) {
                continue;
            }
            let path = entry.path();
            if handler.filter(&path) {
                candidates.push(path);
            }
        }

        Ok(candidates)
    }
}

fn validate_directory(directory: &Path) -> Result<(), DirScannerError> {
    match fs::metadata(directory) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DirScannerError::Usage(format!(
            "path is not a directory: {}",
            directory.display()
        ))),
        Err(e) => Err(DirScannerError::Usage(format!(
            "cannot read scan directory {}: {e}",
            directory.display()
        ))),
    }
}

fn compile_glob(glob: &str) -> Result<GlobMatcher, DirScannerError> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map(|g| g.compile_matcher())
        .map_err(|e| DirScannerError::InvalidGlob {
            glob: glob.to_string(),
            message: e.to_string(),
        })
}
