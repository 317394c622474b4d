// SPDX-FileCopyrightText: 2026 Dirscanner Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock plugin for deterministic lifecycle and registry tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dirscanner_core::{DirScannerError, ScanHandler};
use dirscanner_plugin::{CommandDescriptor, DirScannerPlugin, PluginContext, PluginDescriptor};

use crate::mock_handler::MockHandler;

/// What [`MockPlugin::shutdown`](DirScannerPlugin::shutdown) does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownBehavior {
    Succeed,
    Fail,
    /// Never returns.
    Hang,
}

/// A plugin whose lifecycle behaviour is set up front.
///
/// Clones share their call counters, so a test can keep one clone and hand
/// others to a catalog through [`factory`](Self::factory).
#[derive(Debug, Clone)]
pub struct MockPlugin {
    descriptor: PluginDescriptor,
    fail_init: bool,
    shutdown: ShutdownBehavior,
    commands: Vec<CommandDescriptor>,
    init_calls: Arc<AtomicUsize>,
    shutdown_calls: Arc<AtomicUsize>,
    shutdown_completed: Arc<AtomicBool>,
    context: Arc<Mutex<Option<PluginContext>>>,
}

impl MockPlugin {
    /// An enabled plugin contributing one command, `scan-<name>`.
    pub fn new(name: &str) -> Self {
        Self {
            descriptor: PluginDescriptor::new(name, format!("mock plugin {name}")),
            fail_init: false,
            shutdown: ShutdownBehavior::Succeed,
            commands: vec![CommandDescriptor::new(
                format!("scan-{name}"),
                format!("Run the {name} mock"),
                name,
            )],
            init_calls: Arc::new(AtomicUsize::new(0)),
            shutdown_calls: Arc::new(AtomicUsize::new(0)),
            shutdown_completed: Arc::new(AtomicBool::new(false)),
            context: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.descriptor.description = description.to_string();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.descriptor = self.descriptor.disabled();
        self
    }

    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn with_shutdown(mut self, behavior: ShutdownBehavior) -> Self {
        self.shutdown = behavior;
        self
    }

    pub fn without_commands(mut self) -> Self {
        self.commands.clear();
        self
    }

    /// A catalog factory producing clones of this mock.
    pub fn factory(&self) -> impl Fn() -> Arc<dyn DirScannerPlugin> + Send + Sync + 'static {
        let template = self.clone();
        move || Arc::new(template.clone()) as Arc<dyn DirScannerPlugin>
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn shutdown_calls(&self) -> usize {
        self.shutdown_calls.load(Ordering::SeqCst)
    }

    /// True once a non-hanging shutdown has run to completion.
    pub fn shutdown_completed(&self) -> bool {
        self.shutdown_completed.load(Ordering::SeqCst)
    }

    /// The context received at initialization, if any.
    pub fn context(&self) -> Option<PluginContext> {
        self.context.lock().ok().and_then(|c| c.clone())
    }
}

#[async_trait]
impl DirScannerPlugin for MockPlugin {
    fn descriptor(&self) -> PluginDescriptor {
        self.descriptor.clone()
    }

    async fn initialize(&self, context: PluginContext) -> Result<(), DirScannerError> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_init {
            return Err(DirScannerError::plugin(format!(
                "{} refused to start",
                self.descriptor.name
            )));
        }
        if let Ok(mut slot) = self.context.lock() {
            *slot = Some(context);
        }
        Ok(())
    }

    async fn shutdown(&self, _timeout: Duration) -> Result<(), DirScannerError> {
        self.shutdown_calls.fetch_add(1, Ordering::SeqCst);
        match self.shutdown {
            ShutdownBehavior::Succeed => {
                self.shutdown_completed.store(true, Ordering::SeqCst);
                Ok(())
            }
            ShutdownBehavior::Fail => {
                self.shutdown_completed.store(true, Ordering::SeqCst);
                Err(DirScannerError::plugin("mock shutdown failure"))
            }
            ShutdownBehavior::Hang => {
                std::future::pending::<()>().await;
                Ok(())
            }
        }
    }

    fn command_descriptors(&self) -> Vec<CommandDescriptor> {
        self.commands.clone()
    }

    fn create_handler(&self) -> Result<Box<dyn ScanHandler>, DirScannerError> {
        Ok(Box::new(MockHandler::new("*")))
    }
}
