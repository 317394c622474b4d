// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory batching for consolidated index output.
//!
//! Handlers in index mode append one [`BatchRecord`] per processed file and
//! write the whole batch in a single pass once it reaches
//! [`INDEX_BATCH_SIZE`] records, plus once more for the remainder on flush.

use std::path::PathBuf;

/// Number of records that triggers an automatic write pass.
pub const INDEX_BATCH_SIZE: usize = 100;

/// One parsed input awaiting the next index write.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord<P> {
    pub source: PathBuf,
    pub payload: P,
    pub destination: PathBuf,
}

/// Ordered buffer of [`BatchRecord`]s owned by a single handler.
#[derive(Debug)]
pub struct IndexBatch<P> {
    records: Vec<BatchRecord<P>>,
    threshold: usize,
    write_passes: usize,
}

impl<P> IndexBatch<P> {
    pub fn new() -> Self {
        Self::with_threshold(INDEX_BATCH_SIZE)
    }

    pub fn with_threshold(threshold: usize) -> Self {
        let threshold = threshold.max(1);
        Self {
            records: Vec::with_capacity(threshold),
            threshold,
            write_passes: 0,
        }
    }

    /// Append a record. Returns `true` when the batch has reached its threshold
    /// and should be written.
    pub fn push(&mut self, record: BatchRecord<P>) -> bool {
        self.records.push(record);
        self.is_full()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= self.threshold
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BatchRecord<P>] {
        &self.records
    }

    /// Number of write passes completed so far.
    pub fn write_passes(&self) -> usize {
        self.write_passes
    }

    /// Hand the buffered records to `write` as one pass and clear them if it
    /// succeeds. On failure the records stay buffered for the next attempt.
    /// An empty batch is a no-op and `write` is not called.
    pub fn flush_with<E>(
        &mut self,
        write: impl FnOnce(&[BatchRecord<P>], usize) -> Result<(), E>,
    ) -> Result<usize, E> {
        if self.records.is_empty() {
            return Ok(0);
        }
        write(&self.records, self.write_passes)?;
        self.write_passes += 1;
        let written = self.records.len();
        self.records.clear();
        Ok(written)
    }
}

impl<P> Default for IndexBatch<P> {
    fn default() -> Self {
        Self::new()
    }
}
