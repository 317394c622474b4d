// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for dirscanner integration tests.
//!
//! # Components
//!
//! - [`MockPlugin`] - Plugin with scriptable initialize/shutdown behaviour
//! - [`MockHandler`] - Handler that reports a fixed outcome per file name
//! - [`RecordingReporter`] - Progress reporter that keeps every event
//! - [`ScanFixture`] - Temporary scan, output, and plugin directories

pub mod fixture;
pub mod mock_handler;
pub mod mock_plugin;
pub mod recording_reporter;

pub use fixture::ScanFixture;
pub use mock_handler::MockHandler;
pub use mock_plugin::{MockPlugin, ShutdownBehavior};
pub use recording_reporter::{Outcome, RecordedEvent, RecordingReporter};
