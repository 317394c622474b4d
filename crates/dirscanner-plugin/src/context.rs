// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-plugin scoped services handed over at initialization.

use std::sync::Arc;

use dirscanner_config::{ConfigurationResolver, ScopedConfig};
use tokio_util::sync::CancellationToken;
use tracing::Span;

/// Services scoped to one plugin: its configuration, its logging namespace,
/// and a cancellation token.
///
/// The token is cancelled when the plugin's shutdown times out, and for every
/// plugin once `shutdown_all` finishes. After that the context is no longer
/// valid.
#[derive(Debug, Clone)]
pub struct PluginContext {
    config: ScopedConfig,
    namespace: String,
    span: Span,
    cancel: CancellationToken,
}

impl PluginContext {
    pub fn new(resolver: Arc<ConfigurationResolver>, plugin_name: &str) -> Self {
        let namespace = format!("plugin.{plugin_name}");
        let span = tracing::info_span!("plugin", namespace = %namespace);
        Self {
            config: ScopedConfig::new(resolver, plugin_name),
            namespace,
            span,
            cancel: CancellationToken::new(),
        }
    }

    /// Config lookup pre-bound to this plugin's name.
    pub fn config(&self) -> &ScopedConfig {
        &self.config
    }

    pub fn plugin_name(&self) -> &str {
        self.config.plugin_name()
    }

    /// `plugin.<name>`
    pub fn log_namespace(&self) -> &str {
        &self.namespace
    }

    /// Span to enter when logging on behalf of this plugin.
    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_valid(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    pub(crate) fn invalidate(&self) {
        self.cancel.cancel();
    }
}
