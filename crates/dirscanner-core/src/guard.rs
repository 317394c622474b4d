// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scoped flush for handlers that buffer index output.
//!
//! Index-mode handlers keep a tail of records below the batch threshold that
//! is only written by [`ScanHandler::flush`]. [`FlushGuard`] ties that call to
//! scope exit: [`finish`](FlushGuard::finish) flushes and reports the result,
//! and a guard dropped without `finish` (early `?` return) still flushes and
//! logs any failure.

use tracing::{error, warn};

use crate::error::DirScannerError;
use crate::traits::ScanHandler;
use crate::types::ScanRequest;

pub struct FlushGuard<'a> {
    handler: &'a mut dyn ScanHandler,
    request: &'a ScanRequest,
    flushed: bool,
}

impl<'a> FlushGuard<'a> {
    pub fn new(handler: &'a mut dyn ScanHandler, request: &'a ScanRequest) -> Self {
        Self {
            handler,
            request,
            flushed: false,
        }
    }

    /// The guarded handler, for passing into the engine.
    pub fn handler(&mut self) -> &mut dyn ScanHandler {
        &mut *self.handler
    }

    /// Flush now and surface the outcome.
    pub fn finish(mut self) -> Result<(), DirScannerError> {
        self.flushed = true;
        self.handler.flush(self.request)
    }
}

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        if self.flushed {
            return;
        }
        if std::thread::panicking() {
            error!(
                directory = %self.request.directory().display(),
                "handler not flushed: unwinding from a panic"
            );
            return;
        }
        if let Err(e) = self.handler.flush(self.request) {
            warn!(error = %e, "flush on scope exit failed");
        }
    }
}
