// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Progress reporter that records every event for assertions.

use std::path::{Path, PathBuf};

use dirscanner_core::{ProgressReporter, ScanStatus};

/// Which outcome an event reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Processed,
    Skipped,
    Errored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub outcome: Outcome,
    pub file: PathBuf,
    pub message: String,
    /// Rendered cause, for errored events that carried one.
    pub cause: Option<String>,
}

/// Keeps events in the order they were reported.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Vec<RecordedEvent>,
    status: ScanStatus,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Events with the given outcome, in report order.
    pub fn with_outcome(&self, outcome: Outcome) -> Vec<&RecordedEvent> {
        self.events.iter().filter(|e| e.outcome == outcome).collect()
    }

    /// File names of all events, in report order.
    pub fn file_names(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| e.file.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    fn push(&mut self, outcome: Outcome, file: &Path, message: &str, cause: Option<String>) {
        self.events.push(RecordedEvent {
            outcome,
            file: file.to_path_buf(),
            message: message.to_string(),
            cause,
        });
    }
}

impl ProgressReporter for RecordingReporter {
    fn report_processed(&mut self, file: &Path, message: &str) {
        self.status.record_processed();
        self.push(Outcome::Processed, file, message, None);
    }

    fn report_skipped(&mut self, file: &Path, message: &str) {
        self.status.record_skipped();
        self.push(Outcome::Skipped, file, message, None);
    }

    fn report_errored(
        &mut self,
        file: &Path,
        message: &str,
        cause: Option<&(dyn std::error::Error + 'static)>,
    ) {
        self.status.record_errored();
        self.push(Outcome::Errored, file, message, cause.map(|c| c.to_string()));
    }

    fn status(&self) -> &ScanStatus {
        &self.status
    }
}
