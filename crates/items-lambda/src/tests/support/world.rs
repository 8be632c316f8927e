//! BDD test world for bootstrap scenarios: loader, reporter, provider, and
//! the outcome of the bootstrap sequence.

use std::cell::RefCell;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::bootstrap::{BootstrapError, ConfigLoader, Function, bootstrap_with};
use crate::dispatch::{GatewayRequest, GatewayResponse};

use super::config_loader::{BlankTableLoader, FailingConfigLoader, TestConfigLoader};
use super::reporter::RecordingHealthReporter;
use super::store_provider::RecordingStoreProvider;

/// Builds a single-threaded runtime for driving async code from sync steps.
#[must_use]
pub fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime")
}

/// Scenario world shared across bootstrap steps.
pub struct TestWorld {
    runtime: Runtime,
    loader: Box<dyn ConfigLoader>,
    pub reporter: Arc<RecordingHealthReporter>,
    pub provider: RecordingStoreProvider,
    function: Option<Function>,
    bootstrap_error: Option<BootstrapError>,
    last_response: Option<GatewayResponse>,
}

impl TestWorld {
    /// Builds a world with a successful configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime: runtime(),
            loader: Box::new(TestConfigLoader),
            reporter: Arc::new(RecordingHealthReporter::default()),
            provider: RecordingStoreProvider::default(),
            function: None,
            bootstrap_error: None,
            last_response: None,
        }
    }

    /// Installs a loader that always fails.
    pub fn use_failing_loader(&mut self) {
        self.loader = Box::new(FailingConfigLoader);
        self.reset_results();
    }

    /// Installs a loader that succeeds.
    pub fn use_successful_loader(&mut self) {
        self.loader = Box::new(TestConfigLoader);
        self.reset_results();
    }

    /// Installs a loader whose table name is blank.
    pub fn use_blank_table_loader(&mut self) {
        self.loader = Box::new(BlankTableLoader);
        self.reset_results();
    }

    /// Runs the bootstrap sequence once.
    pub fn bootstrap(&mut self) {
        if self.function.is_some() || self.bootstrap_error.is_some() {
            return;
        }

        let outcome = self.runtime.block_on(bootstrap_with(
            &*self.loader,
            self.reporter.clone(),
            &self.provider,
        ));
        match outcome {
            Ok(function) => self.function = Some(function),
            Err(error) => self.bootstrap_error = Some(error),
        }
    }

    /// Sends one request through the bootstrapped function.
    pub fn invoke(&mut self, request: &GatewayRequest) {
        let Some(function) = self.function.as_ref() else {
            return;
        };
        self.last_response = Some(self.runtime.block_on(function.invoke(request)));
    }

    /// Returns whether bootstrap produced an error.
    #[must_use]
    pub fn bootstrap_error(&self) -> Option<&BootstrapError> {
        self.bootstrap_error.as_ref()
    }

    /// Returns the bootstrapped function, if any.
    #[must_use]
    pub fn function(&self) -> Option<&Function> {
        self.function.as_ref()
    }

    /// Returns the last invocation response, if any.
    #[must_use]
    pub fn last_response(&self) -> Option<&GatewayResponse> {
        self.last_response.as_ref()
    }

    fn reset_results(&mut self) {
        self.function = None;
        self.bootstrap_error = None;
        self.last_response = None;
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Default test world fixture.
#[must_use]
pub fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::new())
}
