// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine-level tests for batched index output and outcome accounting.

use std::fs;
use std::path::{Path, PathBuf};

use dirscanner_core::{
    BatchRecord, DelimitedWriter, DirScannerError, IndexBatch, ProgressReporter, ScanEngine,
    ScanHandler, ScanRequest, ScanStatus,
};

/// Records each file's byte length into an index, or skips files named `skip-*`
/// and errors on files named `bad-*`.
struct SizeIndexHandler {
    batch: IndexBatch<u64>,
    writer: DelimitedWriter,
    dispatch_order: Vec<String>,
}

impl SizeIndexHandler {
    fn new() -> Self {
        Self {
            batch: IndexBatch::new(),
            writer: DelimitedWriter::new(),
            dispatch_order: Vec::new(),
        }
    }

    fn write_batch(&mut self, index: &Path) -> Result<usize, DirScannerError> {
        let writer = self.writer;
        self.batch.flush_with(|records, pass| {
            let rows = records.iter().map(|r| {
                vec![
                    r.source.file_name().unwrap().to_string_lossy().into_owned(),
                    r.payload.to_string(),
                ]
            });
            if pass == 0 {
                writer.write(index, &["File", "Size"], rows)
            } else {
                writer.append(index, rows)
            }
        })
    }
}

impl ScanHandler for SizeIndexHandler {
    fn search_glob(&self) -> &str {
        "*.dat"
    }

    fn handle_matched(
        &mut self,
        request: &ScanRequest,
        reporter: &mut dyn ProgressReporter,
        file: &Path,
    ) -> Result<(), DirScannerError> {
        let name = file.file_name().unwrap().to_string_lossy().into_owned();
        self.dispatch_order.push(name.clone());

        if name.starts_with("skip-") {
            reporter.report_skipped(file, "skipped by name");
            return Ok(());
        }
        if name.starts_with("bad-") {
            reporter.report_errored(file, "bad by name", None);
            return Ok(());
        }

        let size = fs::metadata(file)
            .map_err(|e| DirScannerError::io(file, e))?
            .len();
        let index = request.index_path().unwrap().to_path_buf();
        let full = self.batch.push(BatchRecord {
            source: file.to_path_buf(),
            payload: size,
            destination: index.clone(),
        });
        if full {
            self.write_batch(&index)?;
        }
        reporter.report_processed(file, "indexed");
        Ok(())
    }

    fn flush(&mut self, request: &ScanRequest) -> Result<(), DirScannerError> {
        if let Some(index) = request.index_path() {
            let index = index.to_path_buf();
            self.write_batch(&index)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct Tally(ScanStatus);

impl ProgressReporter for Tally {
    fn report_processed(&mut self, _file: &Path, _message: &str) {
        self.0.record_processed();
    }
    fn report_skipped(&mut self, _file: &Path, _message: &str) {
        self.0.record_skipped();
    }
    fn report_errored(
        &mut self,
        _file: &Path,
        _message: &str,
        _cause: Option<&(dyn std::error::Error + 'static)>,
    ) {
        self.0.record_errored();
    }
    fn status(&self) -> &ScanStatus {
        &self.0
    }
}

fn populate(dir: &Path, count: usize) {
    for n in 1..=count {
        fs::write(dir.join(format!("f{n:03}.dat")), vec![b'x'; n]).unwrap();
    }
}

fn index_request(dir: &Path) -> (ScanRequest, PathBuf) {
    let index = dir.join("idx").join("index.csv");
    let request = ScanRequest::builder(dir).index_path(Some(index.clone())).build();
    (request, index)
}

#[test]
fn one_hundred_fifty_files_take_two_write_passes() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 150);
    let (request, index) = index_request(dir.path());

    let mut handler = SizeIndexHandler::new();
    let mut tally = Tally::default();
    let dispatched = ScanEngine::new()
        .scan_and_flush(&request, &mut handler, &mut tally)
        .unwrap();

    assert_eq!(dispatched, 150);
    assert_eq!(handler.batch.write_passes(), 2);
    assert!(handler.batch.is_empty());

    let content = fs::read_to_string(&index).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 151);
    assert_eq!(lines[0], "File,Size");
    let written: Vec<String> = lines[1..]
        .iter()
        .map(|l| l.split(',').next().unwrap().to_string())
        .collect();
    assert_eq!(written, handler.dispatch_order);
}

#[test]
fn below_threshold_nothing_is_written_until_flush() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 42);
    let (request, index) = index_request(dir.path());

    let mut handler = SizeIndexHandler::new();
    let mut tally = Tally::default();
    ScanEngine::new().scan(&request, &mut handler, &mut tally).unwrap();

    assert!(!index.exists());
    assert_eq!(handler.batch.len(), 42);

    handler.flush(&request).unwrap();
    assert_eq!(handler.batch.write_passes(), 1);
    let content = fs::read_to_string(&index).unwrap();
    assert_eq!(content.lines().count(), 43);
}

#[test]
fn exactly_threshold_flushes_automatically() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 100);
    let (request, index) = index_request(dir.path());

    let mut handler = SizeIndexHandler::new();
    let mut tally = Tally::default();
    ScanEngine::new().scan(&request, &mut handler, &mut tally).unwrap();

    assert_eq!(handler.batch.write_passes(), 1);
    assert!(handler.batch.is_empty());
    assert_eq!(fs::read_to_string(&index).unwrap().lines().count(), 101);

    handler.flush(&request).unwrap();
    assert_eq!(handler.batch.write_passes(), 1);
}

#[test]
fn outcomes_sum_to_matched_files() {
    let dir = tempfile::tempdir().unwrap();
    populate(dir.path(), 7);
    fs::write(dir.path().join("skip-1.dat"), b"s").unwrap();
    fs::write(dir.path().join("bad-1.dat"), b"b").unwrap();
    fs::write(dir.path().join("bad-2.dat"), b"b").unwrap();
    fs::write(dir.path().join("ignored.txt"), b"i").unwrap();
    let (request, _) = index_request(dir.path());

    let mut handler = SizeIndexHandler::new();
    let mut tally = Tally::default();
    let dispatched = ScanEngine::new()
        .scan_and_flush(&request, &mut handler, &mut tally)
        .unwrap();

    let status = tally.status();
    assert_eq!(dispatched, 10);
    assert_eq!(status.processed(), 7);
    assert_eq!(status.skipped(), 1);
    assert_eq!(status.errored(), 2);
    assert_eq!(status.total(), dispatched);
}
