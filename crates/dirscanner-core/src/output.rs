// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delimited-text output shared by handlers.
//!
//! Fields containing the delimiter, the quote character, or a line break are
//! quoted, with embedded quotes doubled.

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::DirScannerError;

/// Writes a header row followed by data rows.
#[derive(Debug, Clone, Copy)]
pub struct DelimitedWriter {
    delimiter: u8,
}

impl DelimitedWriter {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Create or truncate `path`, then write `headers` and `rows`.
    pub fn write<R, F>(&self, path: &Path, headers: &[&str], rows: R) -> Result<(), DirScannerError>
    where
        R: IntoIterator<Item = Vec<F>>,
        F: AsRef<[u8]>,
    {
        let file = open(path, false)?;
        self.write_records(path, file, Some(headers), rows)
    }

    /// Append `rows` to an existing artifact without repeating the header.
    pub fn append<R, F>(&self, path: &Path, rows: R) -> Result<(), DirScannerError>
    where
        R: IntoIterator<Item = Vec<F>>,
        F: AsRef<[u8]>,
    {
        let file = open(path, true)?;
        self.write_records(path, file, None, rows)
    }

    fn write_records<R, F>(
        &self,
        path: &Path,
        file: File,
        headers: Option<&[&str]>,
        rows: R,
    ) -> Result<(), DirScannerError>
    where
        R: IntoIterator<Item = Vec<F>>,
        F: AsRef<[u8]>,
    {
        let output_err = |e: csv::Error| DirScannerError::Output {
            path: path.to_path_buf(),
            source: Box::new(e),
        };

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(file);

        if let Some(headers) = headers {
            writer.write_record(headers).map_err(output_err)?;
        }
        for row in rows {
            writer.write_record(&row).map_err(output_err)?;
        }
        writer.flush().map_err(|e| DirScannerError::Output {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }
}

impl Default for DelimitedWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn open(path: &Path, append: bool) -> Result<File, DirScannerError> {
    let Some(parent) = path.parent() else {
        return Err(DirScannerError::Usage(format!(
            "refusing to write to the root directory: {}",
            path.display()
        )));
    };
    fs::create_dir_all(parent).map_err(|e| DirScannerError::io(parent, e))?;

    let mut options = OpenOptions::new();
    if append {
        options.append(true).create(true);
    } else {
        options.write(true).create(true).truncate(true);
    }
    options.open(path).map_err(|e| DirScannerError::io(path, e))
}
