// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Index-mode output shared by handlers.
//!
//! [`IndexOutput`] owns the batch, the writer and the decision whether the
//! shared destination may be written at all. That decision is made once, on
//! the first file: an existing index is only replaced when overwrite is set.
//! The first write pass creates the index with a header row, later passes
//! append.

use std::path::Path;

use tracing::{debug, warn};

use crate::batch::{BatchRecord, IndexBatch};
use crate::error::DirScannerError;
use crate::output::DelimitedWriter;
use crate::traits::ProgressReporter;
use crate::types::ScanRequest;

/// Turns one buffered record into the index rows it contributes.
pub type IndexRows<P> = fn(&BatchRecord<P>) -> Vec<Vec<String>>;

pub struct IndexOutput<P> {
    writer: DelimitedWriter,
    headers: &'static [&'static str],
    rows: IndexRows<P>,
    batch: IndexBatch<P>,
    /// Decided on first use.
    writable: Option<bool>,
}

impl<P> IndexOutput<P> {
    pub fn new(writer: DelimitedWriter, headers: &'static [&'static str], rows: IndexRows<P>) -> Self {
        Self {
            writer,
            headers,
            rows,
            batch: IndexBatch::new(),
            writable: None,
        }
    }

    /// Write a pass every `threshold` records instead of the default.
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.batch = IndexBatch::with_threshold(threshold);
        self
    }

    /// Records buffered but not yet written.
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    pub fn write_passes(&self) -> usize {
        self.batch.write_passes()
    }

    /// Buffer `payload` for `file`, writing a pass when the batch fills up.
    ///
    /// Reports exactly one outcome for `file`. When the pass it triggers fails,
    /// `file` is reported errored with the number of records left unwritten;
    /// those records stay buffered for the next pass.
    pub fn add(
        &mut self,
        request: &ScanRequest,
        reporter: &mut dyn ProgressReporter,
        file: &Path,
        index: &Path,
        payload: P,
    ) {
        let writable = *self
            .writable
            .get_or_insert_with(|| !index.exists() || request.should_overwrite());
        if !writable {
            reporter.report_skipped(file, &format!("{} exists (no-clobber)", index.display()));
            return;
        }

        if request.is_dry_run() {
            reporter.report_processed(file, &format!("would index into {}", index.display()));
            return;
        }

        let full = self.batch.push(BatchRecord {
            source: file.to_path_buf(),
            payload,
            destination: index.to_path_buf(),
        });
        if full {
            if let Err(e) = self.write_pending() {
                let message = format!(
                    "failed to write index, {} records not written",
                    self.batch.len()
                );
                reporter.report_errored(file, &message, Some(&e));
                return;
            }
        }
        reporter.report_processed(file, "indexed");
    }

    /// Write whatever is still buffered. Fails with
    /// [`DirScannerError::IndexIncomplete`] naming how many records were lost.
    pub fn flush(&mut self) -> Result<usize, DirScannerError> {
        self.write_pending()
    }

    fn write_pending(&mut self) -> Result<usize, DirScannerError> {
        let writer = self.writer;
        let headers = self.headers;
        let rows = self.rows;
        let pending = self.batch.len();

        let result = self.batch.flush_with(|records, pass| {
            let Some(index) = records.first().map(|r| r.destination.clone()) else {
                return Ok(());
            };
            let lines = records.iter().flat_map(rows);
            let written = if pass == 0 {
                writer.write(&index, headers, lines)
            } else {
                writer.append(&index, lines)
            };
            written.map_err(|source| DirScannerError::IndexIncomplete {
                path: index,
                pending,
                source: Box::new(source),
            })
        });

        match result {
            Ok(written) => {
                debug!(records = written, pass = self.batch.write_passes(), "wrote index batch");
                Ok(written)
            }
            Err(e) => {
                warn!(pending, error = %e, "index write failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::types::ScanStatus;

    #[derive(Default)]
    struct Log {
        status: ScanStatus,
        messages: Vec<String>,
    }

    impl ProgressReporter for Log {
        fn report_processed(&mut self, _file: &Path, _message: &str) {
            self.status.record_processed();
        }
        fn report_skipped(&mut self, _file: &Path, _message: &str) {
            self.status.record_skipped();
        }
        fn report_errored(
            &mut self,
            _file: &Path,
            message: &str,
            _cause: Option<&(dyn std::error::Error + 'static)>,
        ) {
            self.status.record_errored();
            self.messages.push(message.to_string());
        }
        fn status(&self) -> &ScanStatus {
            &self.status
        }
    }

    fn name_and_size(record: &BatchRecord<u64>) -> Vec<Vec<String>> {
        let name = record
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        vec![vec![name, record.payload.to_string()]]
    }

    fn output() -> IndexOutput<u64> {
        IndexOutput::new(DelimitedWriter::new(), &["File", "Size"], name_and_size).with_threshold(2)
    }

    fn request(index: &Path) -> ScanRequest {
        ScanRequest::builder("/in").index_path(Some(index.to_path_buf())).build()
    }

    fn add_all(out: &mut IndexOutput<u64>, request: &ScanRequest, log: &mut Log, count: u64) {
        let index = request.index_path().unwrap().to_path_buf();
        for n in 0..count {
            out.add(request, log, &PathBuf::from(format!("/in/f{n}")), &index, n);
        }
    }

    #[test]
    fn header_once_then_appended_passes() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("idx.csv");
        let request = request(&index);
        let mut out = output();
        let mut log = Log::default();

        add_all(&mut out, &request, &mut log, 5);
        assert_eq!(out.write_passes(), 2);
        assert_eq!(out.pending(), 1);
        assert_eq!(out.flush().unwrap(), 1);

        assert_eq!(
            fs::read_to_string(&index).unwrap(),
            "File,Size\nf0,0\nf1,1\nf2,2\nf3,3\nf4,4\n"
        );
        assert_eq!(log.status.processed(), 5);
    }

    #[test]
    fn existing_index_is_replaced_only_with_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("idx.csv");
        fs::write(&index, "old\n").unwrap();

        let mut out = output();
        let mut log = Log::default();
        add_all(&mut out, &request(&index), &mut log, 3);
        out.flush().unwrap();
        assert_eq!(log.status.skipped(), 3);
        assert_eq!(fs::read_to_string(&index).unwrap(), "old\n");

        let overwrite = ScanRequest::builder("/in")
            .index_path(Some(index.clone()))
            .overwrite(true)
            .build();
        let mut out = output();
        let mut log = Log::default();
        add_all(&mut out, &overwrite, &mut log, 3);
        out.flush().unwrap();
        assert_eq!(log.status.processed(), 3);
        assert_eq!(fs::read_to_string(&index).unwrap(), "File,Size\nf0,0\nf1,1\nf2,2\n");
    }

    #[test]
    fn failed_pass_counts_unwritten_records() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();
        let index = blocker.join("idx.csv");

        let mut out = output();
        let mut log = Log::default();
        add_all(&mut out, &request(&index), &mut log, 2);

        assert_eq!(log.status.processed(), 1);
        assert_eq!(log.status.errored(), 1);
        assert_eq!(log.messages, vec!["failed to write index, 2 records not written"]);
        assert_eq!(out.pending(), 2);
        assert_eq!(out.write_passes(), 0);

        match out.flush() {
            Err(DirScannerError::IndexIncomplete { path, pending, .. }) => {
                assert_eq!(path, index);
                assert_eq!(pending, 2);
            }
            other => panic!("expected IndexIncomplete, got {other:?}"),
        }
    }

    #[test]
    fn dry_run_buffers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("idx.csv");
        let request = ScanRequest::builder("/in")
            .index_path(Some(index.clone()))
            .dry_run(true)
            .build();
        let mut out = output();
        let mut log = Log::default();
        add_all(&mut out, &request, &mut log, 4);

        assert_eq!(log.status.processed(), 4);
        assert_eq!(out.pending(), 0);
        assert_eq!(out.flush().unwrap(), 0);
        assert!(!index.exists());
    }
}
