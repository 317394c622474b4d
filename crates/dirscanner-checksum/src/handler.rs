// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scan handler recording SHA-256 digests of matched files.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use dirscanner_core::{
    BatchRecord, DelimitedWriter, DirScannerError, IndexOutput, ProgressReporter, ScanHandler,
    ScanRequest,
};
use sha2::{Digest, Sha256};

/// Suffix of per-file artifacts. Files carrying it are never scanned.
pub const OUTPUT_SUFFIX: &str = ".sha256.csv";
pub const INDIVIDUAL_HEADERS: [&str; 3] = ["Path", "Size", "Sha256"];
pub const INDEX_HEADERS: [&str; 3] = ["File", "Size", "Sha256"];

/// Digest and size of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub size: u64,
    /// Lowercase hex SHA-256.
    pub sha256: String,
}

impl FileDigest {
    pub fn compute(path: &Path) -> Result<Self, DirScannerError> {
        let mut file = File::open(path).map_err(|e| DirScannerError::io(path, e))?;
        let mut hasher = Sha256::new();
        let size = io::copy(&mut file, &mut hasher).map_err(|e| DirScannerError::io(path, e))?;
        Ok(Self {
            size,
            sha256: hex::encode(hasher.finalize()),
        })
    }
}

pub struct ChecksumHandler {
    glob: String,
    writer: DelimitedWriter,
    index: IndexOutput<FileDigest>,
}

impl ChecksumHandler {
    pub fn new(glob: impl Into<String>) -> Self {
        let writer = DelimitedWriter::new();
        Self {
            glob: glob.into(),
            writer,
            index: IndexOutput::new(writer, &INDEX_HEADERS, index_row),
        }
    }

    /// Digests waiting for the next index write.
    pub fn pending(&self) -> usize {
        self.index.pending()
    }

    pub fn write_passes(&self) -> usize {
        self.index.write_passes()
    }
}

impl ScanHandler for ChecksumHandler {
    fn search_glob(&self) -> &str {
        &self.glob
    }

    fn filter(&self, path: &Path) -> bool {
        path.is_file() && !file_name(path).ends_with(OUTPUT_SUFFIX)
    }

    fn handle_matched(
        &mut self,
        request: &ScanRequest,
        reporter: &mut dyn ProgressReporter,
        file: &Path,
    ) -> Result<(), DirScannerError> {
        if request.index_path().is_some_and(|index| same_file(file, index)) {
            reporter.report_skipped(file, "index output of this scan");
            return Ok(());
        }

        let digest = match FileDigest::compute(file) {
            Ok(digest) => digest,
            Err(e) => {
                reporter.report_errored(file, "failed to hash file", Some(&e));
                return Ok(());
            }
        };

        let Some(index) = request.index_path() else {
            let destination = individual_destination(request, file, &digest.sha256);
            if destination.exists() && !request.should_overwrite() {
                reporter.report_skipped(file, &format!("{} exists (no-clobber)", destination.display()));
            } else if request.is_dry_run() {
                reporter.report_processed(file, &format!("would write {}", destination.display()));
            } else {
                let row = vec![
                    file.display().to_string(),
                    digest.size.to_string(),
                    digest.sha256,
                ];
                match self.writer.write(&destination, &INDIVIDUAL_HEADERS, [row]) {
                    Ok(()) => reporter.report_processed(file, &format!("wrote {}", destination.display())),
                    Err(e) => reporter.report_errored(file, "failed to write checksum", Some(&e)),
                }
            }
            return Ok(());
        };

        self.index.add(request, reporter, file, index, digest);
        Ok(())
    }

    fn flush(&mut self, _request: &ScanRequest) -> Result<(), DirScannerError> {
        self.index.flush().map(|_| ())
    }
}

/// `<output dir or file's dir>/<file name>.<first 16 hex>.sha256.csv`
pub fn individual_destination(request: &ScanRequest, file: &Path, sha256: &str) -> PathBuf {
    let dir = request
        .output_directory()
        .map(Path::to_path_buf)
        .or_else(|| file.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let short = &sha256[..sha256.len().min(16)];
    dir.join(format!("{}.{short}{OUTPUT_SUFFIX}", file_name(file)))
}

fn index_row(record: &BatchRecord<FileDigest>) -> Vec<Vec<String>> {
    vec![vec![
        file_name(&record.source),
        record.payload.size.to_string(),
        record.payload.sha256.clone(),
    ]]
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, b"abc").unwrap();
        let digest = FileDigest::compute(&path).unwrap();
        assert_eq!(digest.size, 3);
        assert_eq!(
            digest.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn own_output_is_filtered_out() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data.bin");
        let output = dir.path().join("data.bin.ba7816bf8f01cfea.sha256.csv");
        std::fs::write(&data, b"x").unwrap();
        std::fs::write(&output, b"x").unwrap();
        let handler = ChecksumHandler::new("*");
        assert!(handler.filter(&data));
        assert!(!handler.filter(&output));
        assert!(!handler.filter(dir.path()));
    }

    #[test]
    fn same_file_resolves_relative_spellings() {
        let dir = tempfile::tempdir().unwrap();
        let index = dir.path().join("index.csv");
        std::fs::write(&index, b"old").unwrap();
        assert!(same_file(&index, &dir.path().join(".").join("index.csv")));
        assert!(!same_file(&index, &dir.path().join("other.csv")));
    }

    #[test]
    fn destination_uses_digest_prefix() {
        let request = ScanRequest::builder("/in").build();
        assert_eq!(
            individual_destination(&request, Path::new("/in/a.iso"), "0123456789abcdef0123"),
            PathBuf::from("/in/a.iso.0123456789abcdef.sha256.csv")
        );
    }
}
