// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin bring-up and teardown.
//!
//! Initialization is sequential and fail-fast. Shutdown dispatches one tokio
//! task per initialized plugin, bounds each by the timeout, and clears the
//! registry afterwards whatever the outcomes were.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dirscanner_config::ConfigurationResolver;
use dirscanner_core::{DirScannerError, ScanHandler};
use futures::future::join_all;
use tracing::{Instrument, debug, error, info, warn};

use crate::context::PluginContext;
use crate::descriptor::CommandDescriptor;
use crate::registry::PluginRegistry;

/// Used by [`PluginLifecycleManager::shutdown_all_default`] unless overridden.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a plugin is in its lifecycle. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PluginState {
    Discovered,
    Initialized,
    ShuttingDown,
    Shutdown,
}

/// How one plugin's shutdown ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownOutcome {
    Completed,
    Failed(String),
    TimedOut,
    /// The plugin was never initialized, so there was nothing to shut down.
    NotInitialized,
}

/// Drives registered plugins through initialize and shutdown.
pub struct PluginLifecycleManager {
    registry: PluginRegistry,
    resolver: Arc<ConfigurationResolver>,
    states: HashMap<String, PluginState>,
    contexts: HashMap<String, PluginContext>,
    shutdown_timeout: Duration,
}

impl PluginLifecycleManager {
    /// Take ownership of a registry whose discovery has already run.
    pub fn new(registry: PluginRegistry, resolver: Arc<ConfigurationResolver>) -> Self {
        let states = registry
            .names()
            .into_iter()
            .map(|name| (name.to_string(), PluginState::Discovered))
            .collect();
        Self {
            registry,
            resolver,
            states,
            contexts: HashMap::new(),
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn state(&self, name: &str) -> Option<PluginState> {
        self.states.get(name).copied()
    }

    /// The context handed to `name` at initialization.
    pub fn context(&self, name: &str) -> Option<&PluginContext> {
        self.contexts.get(name)
    }

    /// Initialize every registered plugin in registration order.
    ///
    /// Stops at the first failure and returns
    /// [`DirScannerError::PluginInit`] naming the plugin. Plugins initialized
    /// before the failure stay initialized. Already initialized plugins are
    /// not initialized again.
    pub async fn initialize_all(&mut self) -> Result<(), DirScannerError> {
        let pending: Vec<_> = self
            .registry
            .all()
            .iter()
            .filter(|instance| self.state(instance.name()) == Some(PluginState::Discovered))
            .map(|instance| (instance.name().to_string(), Arc::clone(&instance.plugin)))
            .collect();

        for (name, plugin) in pending {
            let context = PluginContext::new(Arc::clone(&self.resolver), &name);
            let span = context.span().clone();

            if let Err(e) = plugin.initialize(context.clone()).instrument(span).await {
                error!(plugin = %name, error = %e, "plugin initialization failed");
                return Err(DirScannerError::PluginInit {
                    plugin: name,
                    source: Box::new(e),
                });
            }

            debug!(plugin = %name, "plugin initialized");
            self.states.insert(name.clone(), PluginState::Initialized);
            self.contexts.insert(name, context);
        }

        info!(plugins = self.contexts.len(), "plugins initialized");
        Ok(())
    }

    /// Commands of registered plugins.
    pub fn command_descriptors(&self) -> Vec<CommandDescriptor> {
        self.registry.command_descriptors()
    }

    /// A fresh handler from an initialized plugin.
    pub fn create_handler(&self, name: &str) -> Result<Box<dyn ScanHandler>, DirScannerError> {
        let plugin = self
            .registry
            .lookup(name)
            .ok_or_else(|| DirScannerError::Usage(format!("no plugin named '{name}'")))?;
        if self.state(name) != Some(PluginState::Initialized) {
            return Err(DirScannerError::plugin(format!(
                "plugin {name} is not initialized"
            )));
        }
        plugin.create_handler()
    }

    /// Shut down every registered plugin concurrently, each bounded by
    /// `timeout`, then clear the registry.
    ///
    /// Failures and timeouts are logged and reported in the returned outcomes,
    /// one per plugin in registration order; they never stop other plugins
    /// from shutting down.
    pub async fn shutdown_all(&mut self, timeout: Duration) -> Vec<(String, ShutdownOutcome)> {
        let mut targets = Vec::with_capacity(self.registry.len());
        for instance in self.registry.all() {
            let name = instance.name().to_string();
            let context = match self.states.get(&name) {
                Some(PluginState::Initialized) => self.contexts.get(&name).cloned(),
                _ => None,
            };
            targets.push((name, Arc::clone(&instance.plugin), context));
        }
        for (name, _, context) in &targets {
            if context.is_some() {
                self.states.insert(name.clone(), PluginState::ShuttingDown);
            }
        }

        let tasks = targets.into_iter().map(|(name, plugin, context)| {
            async move {
                let Some(context) = context else {
                    debug!(plugin = %name, "plugin was never initialized, nothing to shut down");
                    return (name, ShutdownOutcome::NotInitialized);
                };

                let span = context.span().clone();
                let handle =
                    tokio::spawn(async move { plugin.shutdown(timeout).await }.instrument(span));
                let abort = handle.abort_handle();

                let outcome = match tokio::time::timeout(timeout, handle).await {
                    Ok(Ok(Ok(()))) => ShutdownOutcome::Completed,
                    Ok(Ok(Err(e))) => {
                        warn!(plugin = %name, error = %e, "plugin shutdown failed");
                        ShutdownOutcome::Failed(e.to_string())
                    }
                    Ok(Err(join_err)) => {
                        warn!(plugin = %name, error = %join_err, "plugin shutdown task panicked");
                        ShutdownOutcome::Failed(join_err.to_string())
                    }
                    Err(_) => {
                        warn!(plugin = %name, timeout = ?timeout, "plugin shutdown timed out, abandoning");
                        context.invalidate();
                        abort.abort();
                        ShutdownOutcome::TimedOut
                    }
                };
                (name, outcome)
            }
        });

        let outcomes = join_all(tasks).await;

        for (name, outcome) in &outcomes {
            if *outcome != ShutdownOutcome::NotInitialized {
                self.states.insert(name.clone(), PluginState::Shutdown);
            }
        }
        for context in self.contexts.values() {
            context.invalidate();
        }
        self.contexts.clear();
        self.registry.clear();

        info!(plugins = outcomes.len(), "plugin shutdown complete");
        outcomes
    }

    /// [`shutdown_all`](Self::shutdown_all) with the configured timeout.
    pub async fn shutdown_all_default(&mut self) -> Vec<(String, ShutdownOutcome)> {
        self.shutdown_all(self.shutdown_timeout).await
    }
}

impl std::fmt::Debug for PluginLifecycleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginLifecycleManager")
            .field("registry", &self.registry)
            .field("states", &self.states)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .finish()
    }
}
