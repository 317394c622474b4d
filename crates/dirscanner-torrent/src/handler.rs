// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scan handler exporting torrent file listings to CSV.
//!
//! Individual mode writes `<stem>.<infohash>.csv` next to each torrent (or
//! into the output directory). Index mode batches every torrent into one
//! shared CSV, written 100 torrents at a time.

use std::path::{Path, PathBuf};

use dirscanner_core::{
    BatchRecord, DelimitedWriter, DirScannerError, IndexOutput, ProgressReporter, ScanHandler,
    ScanRequest,
};

use crate::parser::TorrentMetadata;

pub const SEARCH_GLOB: &str = "*.torrent";
pub const INDIVIDUAL_HEADERS: [&str; 3] = ["InfoHash", "Path", "Size"];
pub const INDEX_HEADERS: [&str; 4] = ["InfoHash", "Path", "Size", "TorrentFile"];

pub struct TorrentHandler {
    writer: DelimitedWriter,
    index: IndexOutput<TorrentMetadata>,
}

impl TorrentHandler {
    pub fn new() -> Self {
        Self::with_writer(DelimitedWriter::new())
    }

    pub fn with_writer(writer: DelimitedWriter) -> Self {
        Self {
            writer,
            index: IndexOutput::new(writer, &INDEX_HEADERS, index_rows),
        }
    }

    /// Torrents waiting for the next index write.
    pub fn pending(&self) -> usize {
        self.index.pending()
    }

    pub fn write_passes(&self) -> usize {
        self.index.write_passes()
    }

    fn write_individual(
        &self,
        request: &ScanRequest,
        reporter: &mut dyn ProgressReporter,
        file: &Path,
        metadata: &TorrentMetadata,
    ) {
        let destination = individual_destination(request, file, &metadata.info_hash);
        if destination.exists() && !request.should_overwrite() {
            reporter.report_skipped(
                file,
                &format!("{} exists (no-clobber)", destination.display()),
            );
            return;
        }

        if request.is_dry_run() {
            reporter.report_processed(file, &format!("would write {}", destination.display()));
            return;
        }

        let rows = metadata.files.iter().map(|f| {
            vec![
                metadata.info_hash.clone(),
                f.path.clone(),
                f.size.to_string(),
            ]
        });
        match self.writer.write(&destination, &INDIVIDUAL_HEADERS, rows) {
            Ok(()) => reporter.report_processed(file, &format!("wrote {}", destination.display())),
            Err(e) => reporter.report_errored(file, "failed to write csv", Some(&e)),
        }
    }
}

impl Default for TorrentHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanHandler for TorrentHandler {
    fn search_glob(&self) -> &str {
        SEARCH_GLOB
    }

    fn handle_matched(
        &mut self,
        request: &ScanRequest,
        reporter: &mut dyn ProgressReporter,
        file: &Path,
    ) -> Result<(), DirScannerError> {
        let metadata = match TorrentMetadata::from_path(file) {
            Ok(metadata) => metadata,
            Err(e) => {
                reporter.report_errored(file, "failed to process torrent file", Some(&e));
                return Ok(());
            }
        };

        match request.index_path() {
            Some(index) => self.index.add(request, reporter, file, index, metadata),
            None => self.write_individual(request, reporter, file, &metadata),
        }
        Ok(())
    }

    fn flush(&mut self, _request: &ScanRequest) -> Result<(), DirScannerError> {
        self.index.flush().map(|_| ())
    }
}

/// `<output dir or torrent's dir>/<stem>.<infohash>.csv`
pub fn individual_destination(request: &ScanRequest, torrent: &Path, info_hash: &str) -> PathBuf {
    let dir = request
        .output_directory()
        .map(Path::to_path_buf)
        .or_else(|| torrent.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let name = file_name(torrent);
    let stem = name.strip_suffix(".torrent").unwrap_or(&name);
    dir.join(format!("{stem}.{info_hash}.csv"))
}

/// One index row per file in the torrent.
fn index_rows(record: &BatchRecord<TorrentMetadata>) -> Vec<Vec<String>> {
    let torrent_file = file_name(&record.source);
    record
        .payload
        .files
        .iter()
        .map(|f| {
            vec![
                record.payload.info_hash.clone(),
                f.path.clone(),
                f.size.to_string(),
                torrent_file.clone(),
            ]
        })
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
