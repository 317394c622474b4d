// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal progress and summary output.

use std::error::Error;
use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use dirscanner_core::{
    DirScannerError, ProgressReporter, ScanReporter, ScanRequest, ScanStatus, Verbosity,
};

/// Reports scan progress to a pair of writers.
///
/// Quiet prints nothing. Normal prints errors and the summary. Verbose adds a
/// line per file and the scan setup. Very verbose adds error cause chains.
pub struct ConsoleReporter<O: Write, E: Write> {
    out: O,
    err: E,
    verbosity: Verbosity,
    use_color: bool,
    status: ScanStatus,
    failed: bool,
}

impl ConsoleReporter<io::Stdout, io::Stderr> {
    pub fn stdio(verbosity: Verbosity, use_color: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), verbosity, use_color)
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    pub fn new(out: O, err: E, verbosity: Verbosity, use_color: bool) -> Self {
        Self {
            out,
            err,
            verbosity,
            use_color,
            status: ScanStatus::new(),
            failed: false,
        }
    }

    #[cfg(test)]
    pub fn into_writers(self) -> (O, E) {
        (self.out, self.err)
    }

    fn quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    // Console write failures are not scan failures.
    fn print_out(&mut self, line: String) {
        let _ = writeln!(self.out, "{line}");
    }

    fn print_success(&mut self, line: String) {
        let line = if self.use_color {
            line.green().to_string()
        } else {
            line
        };
        self.print_out(line);
    }

    fn print_error(&mut self, line: String) {
        let line = if self.use_color {
            line.red().to_string()
        } else {
            line
        };
        let _ = writeln!(self.err, "{line}");
    }

    fn print_causes(&mut self, mut cause: Option<&(dyn Error + 'static)>) {
        while let Some(e) = cause {
            self.print_error(format!("  caused by: {e}"));
            cause = e.source();
        }
    }
}

impl<O: Write, E: Write> ProgressReporter for ConsoleReporter<O, E> {
    fn report_processed(&mut self, file: &Path, message: &str) {
        self.status.record_processed();
        if self.verbosity.is_verbose() {
            self.print_out(format!("Processed {}: {message}", file.display()));
        }
    }

    fn report_skipped(&mut self, file: &Path, message: &str) {
        self.status.record_skipped();
        if self.verbosity.is_verbose() {
            let line = format!("Skipped {}: {message}", file.display());
            let line = if self.use_color {
                line.yellow().to_string()
            } else {
                line
            };
            self.print_out(line);
        }
    }

    fn report_errored(&mut self, file: &Path, message: &str, cause: Option<&(dyn Error + 'static)>) {
        self.status.record_errored();
        if self.quiet() {
            return;
        }
        match cause {
            Some(e) => self.print_error(format!("Error with {}: {message}: {e}", file.display())),
            None => self.print_error(format!("Error with {}: {message}", file.display())),
        }
        if self.verbosity == Verbosity::VeryVerbose {
            self.print_causes(cause.and_then(|e| e.source()));
        }
    }

    fn status(&self) -> &ScanStatus {
        &self.status
    }
}

impl<O: Write, E: Write> ScanReporter for ConsoleReporter<O, E> {
    fn report_start(&mut self, request: &ScanRequest) {
        if !self.verbosity.is_verbose() {
            return;
        }
        self.print_out(format!(
            "Scanning directory {}",
            request.directory().display()
        ));
        if request.is_dry_run() {
            self.print_out("Dry run: no files will be written".to_string());
        }
        match (request.index_path(), request.output_directory()) {
            (Some(index), _) => {
                self.print_out(format!("Index mode: writing {}", index.display()))
            }
            (None, Some(dir)) => {
                self.print_out(format!("Individual mode: writing to {}", dir.display()))
            }
            (None, None) => {
                self.print_out("Individual mode: writing next to source files".to_string())
            }
        }
    }

    fn report_failure(&mut self, error: &DirScannerError) {
        self.failed = true;
        if self.quiet() {
            return;
        }
        self.print_error(format!("Failed to complete scan: {error}"));
        if self.verbosity.is_verbose() {
            self.print_causes(error.source());
        }
    }

    fn report_complete(&mut self) -> i32 {
        let errors = self.status.has_errors();
        if !self.quiet() {
            let summary = format!(
                "Scan completed in {}ms: {} processed, {} skipped, {} errors",
                self.status.elapsed().as_millis(),
                self.status.processed(),
                self.status.skipped(),
                self.status.errored()
            );
            if errors || self.failed {
                self.print_error(summary);
            } else {
                self.print_success(summary);
            }
        }
        i32::from(errors || self.failed)
    }
}
