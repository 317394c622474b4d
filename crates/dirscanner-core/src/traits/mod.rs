// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the scan engine, handlers, and reporting layers.

pub mod handler;
pub mod reporter;

pub use handler::ScanHandler;
pub use reporter::{ProgressReporter, ScanReporter};
