// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request, verbosity, and status types shared by the engine and reporters.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How chatty reporters should be.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    VeryVerbose,
}

impl Verbosity {
    /// Maps CLI flags onto a level: quiet wins, otherwise each `-v` raises one step.
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Verbosity::Quiet;
        }
        match verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        }
    }

    /// True for `Verbose` and `VeryVerbose`.
    pub fn is_verbose(self) -> bool {
        self >= Verbosity::Verbose
    }
}

/// An immutable description of one scan invocation.
///
/// Index mode is not a separate flag: a request is in index mode exactly when
/// it carries an index path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    directory: PathBuf,
    output_directory: Option<PathBuf>,
    index_path: Option<PathBuf>,
    dry_run: bool,
    overwrite: bool,
    verbosity: Verbosity,
}

impl ScanRequest {
    /// Start building a request for the given target directory.
    pub fn builder(directory: impl Into<PathBuf>) -> ScanRequestBuilder {
        ScanRequestBuilder {
            directory: directory.into(),
            output_directory: None,
            index_path: None,
            dry_run: false,
            overwrite: false,
            verbosity: Verbosity::Normal,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn output_directory(&self) -> Option<&Path> {
        self.output_directory.as_deref()
    }

    pub fn index_path(&self) -> Option<&Path> {
        self.index_path.as_deref()
    }

    pub fn is_index_mode(&self) -> bool {
        self.index_path.is_some()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn should_overwrite(&self) -> bool {
        self.overwrite
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

/// Builder for [`ScanRequest`].
#[derive(Debug, Clone)]
pub struct ScanRequestBuilder {
    directory: PathBuf,
    output_directory: Option<PathBuf>,
    index_path: Option<PathBuf>,
    dry_run: bool,
    overwrite: bool,
    verbosity: Verbosity,
}

impl ScanRequestBuilder {
    pub fn output_directory(mut self, dir: Option<PathBuf>) -> Self {
        self.output_directory = dir;
        self
    }

    pub fn index_path(mut self, path: Option<PathBuf>) -> Self {
        self.index_path = path;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn build(self) -> ScanRequest {
        ScanRequest {
            directory: self.directory,
            output_directory: self.output_directory,
            index_path: self.index_path,
            dry_run: self.dry_run,
            overwrite: self.overwrite,
            verbosity: self.verbosity,
        }
    }
}

/// Running counters for one scan.
///
/// Written by a single reporter during dispatch; readable at any point,
/// including mid-scan.
#[derive(Debug, Clone)]
pub struct ScanStatus {
    started: Instant,
    processed: usize,
    skipped: usize,
    errored: usize,
}

impl ScanStatus {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            processed: 0,
            skipped: 0,
            errored: 0,
        }
    }

    pub fn record_processed(&mut self) -> usize {
        self.processed += 1;
        self.processed
    }

    pub fn record_skipped(&mut self) -> usize {
        self.skipped += 1;
        self.skipped
    }

    pub fn record_errored(&mut self) -> usize {
        self.errored += 1;
        self.errored
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn errored(&self) -> usize {
        self.errored
    }

    /// Sum of all outcomes; equals the number of dispatched files after a scan.
    pub fn total(&self) -> usize {
        self.processed + self.skipped + self.errored
    }

    pub fn has_errors(&self) -> bool {
        self.errored > 0
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for ScanStatus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn index_mode_follows_index_path() {
        let plain = ScanRequest::builder("/d").build();
        assert!(!plain.is_index_mode());

        let indexed = ScanRequest::builder("/d")
            .index_path(Some(PathBuf::from("/d/idx.csv")))
            .build();
        assert!(indexed.is_index_mode());
        assert_eq!(indexed.index_path(), Some(Path::new("/d/idx.csv")));
    }

    #[test]
    fn builder_defaults() {
        let request = ScanRequest::builder("/d").build();
        assert_eq!(request.directory(), Path::new("/d"));
        assert!(request.output_directory().is_none());
        assert!(!request.is_dry_run());
        assert!(!request.should_overwrite());
        assert_eq!(request.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, 2), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
        assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, 5), Verbosity::VeryVerbose);
        assert!(Verbosity::VeryVerbose.is_verbose());
        assert!(!Verbosity::Normal.is_verbose());
    }

    #[test]
    fn verbosity_parses_kebab_case() {
        assert_eq!(
            Verbosity::from_str("very-verbose").unwrap(),
            Verbosity::VeryVerbose
        );
        assert_eq!(Verbosity::Quiet.to_string(), "quiet");
    }

    #[test]
    fn status_totals() {
        let mut status = ScanStatus::new();
        status.record_processed();
        status.record_processed();
        status.record_skipped();
        status.record_errored();
        assert_eq!(status.processed(), 2);
        assert_eq!(status.total(), 4);
        assert!(status.has_errors());
    }
}
