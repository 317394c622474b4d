// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composes discovery, plugin lifecycle, and the scan engine.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dirscanner_config::ConfigurationResolver;
use dirscanner_core::{DirScannerError, ProgressReporter, ScanEngine, ScanReporter, ScanRequest};
use dirscanner_plugin::{
    CommandDescriptor, PackageLoader, PluginCatalog, PluginLifecycleManager, PluginRegistry,
    ShutdownOutcome,
};
use tracing::{error, info, warn};

/// Where plugins and their configuration come from.
#[derive(Debug, Clone)]
pub struct HostSettings {
    pub working_dir: PathBuf,
    pub ext_dir: PathBuf,
    pub config_override: Option<PathBuf>,
    pub shutdown_timeout: Duration,
}

/// Owns the initialized plugin set for the lifetime of one invocation.
#[derive(Debug)]
pub struct Orchestrator {
    manager: PluginLifecycleManager,
}

impl Orchestrator {
    /// Discover plugins and initialize every registered one.
    ///
    /// If any plugin fails to initialize, the ones already initialized are
    /// shut down before the error is returned.
    pub async fn bring_up(
        settings: &HostSettings,
        catalog: PluginCatalog,
        loader: impl PackageLoader + 'static,
    ) -> Result<Self, DirScannerError> {
        let mut registry =
            PluginRegistry::new(catalog).with_external_dir(&settings.ext_dir, loader);
        let registered = registry.discover();
        info!(
            registered,
            ext_dir = %settings.ext_dir.display(),
            "plugin discovery complete"
        );

        let resolver = Arc::new(
            ConfigurationResolver::new(&settings.working_dir, &settings.ext_dir)
                .with_override(settings.config_override.clone()),
        );
        let mut manager = PluginLifecycleManager::new(registry, resolver)
            .with_shutdown_timeout(settings.shutdown_timeout);

        if let Err(e) = manager.initialize_all().await {
            manager.shutdown_all_default().await;
            return Err(e);
        }
        Ok(Self { manager })
    }

    pub fn commands(&self) -> Vec<CommandDescriptor> {
        self.manager.command_descriptors()
    }

    /// Print every discovered plugin with its status, then any packages that
    /// failed to load.
    pub fn write_listing(&self, out: &mut impl Write) -> io::Result<()> {
        let registry = self.manager.registry();
        if registry.discovered().is_empty() {
            writeln!(out, "No plugins discovered")?;
        }
        for record in registry.discovered() {
            writeln!(
                out,
                "{} [{}, {}]",
                record.descriptor, record.status, record.source
            )?;
        }
        for failure in registry.package_failures() {
            writeln!(
                out,
                "failed to load {}: {}",
                failure.package.display(),
                failure.message
            )?;
        }
        Ok(())
    }

    /// Run `plugin`'s handler over `request` and return the exit code.
    ///
    /// The handler is flushed even when dispatch stops early. Fatal errors are
    /// handed to `reporter` and still produce a summary.
    pub fn run_scan<R>(&self, plugin: &str, request: &ScanRequest, reporter: &mut R) -> i32
    where
        R: ProgressReporter + ScanReporter,
    {
        reporter.report_start(request);

        let result = self.manager.create_handler(plugin).and_then(|mut handler| {
            ScanEngine::new().scan_and_flush(request, handler.as_mut(), &mut *reporter)
        });

        match result {
            Ok(dispatched) => info!(plugin, dispatched, "scan finished"),
            Err(e) => {
                error!(plugin, error = %e, "scan failed");
                reporter.report_failure(&e);
            }
        }
        reporter.report_complete()
    }

    /// Shut every plugin down with the configured per-plugin timeout.
    pub async fn shutdown(mut self) -> Vec<(String, ShutdownOutcome)> {
        let outcomes = self.manager.shutdown_all_default().await;
        for (name, outcome) in &outcomes {
            if matches!(outcome, ShutdownOutcome::Failed(_) | ShutdownOutcome::TimedOut) {
                warn!(plugin = %name, outcome = ?outcome, "plugin did not shut down cleanly");
            }
        }
        outcomes
    }
}
