//! Structured health reporting for function lifecycle events.

use std::sync::Arc;

use items_config::Config;

use crate::bootstrap::BootstrapError;
use crate::store::StoreError;

pub(crate) const HEALTH_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked before the store client is built.
    fn store_connecting(&self, table: &str);

    /// Invoked once the store client is ready.
    fn store_ready(&self, table: &str);

    /// Invoked when the store client cannot be built.
    fn store_failed(&self, error: &StoreError);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn store_connecting(&self, table: &str) {
        (**self).store_connecting(table);
    }

    fn store_ready(&self, table: &str) {
        (**self).store_ready(table);
    }

    fn store_failed(&self, error: &StoreError) {
        (**self).store_failed(error);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting function bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            table = %config.table_name(),
            region = config.region().unwrap_or("default"),
            log_filter = %config.log_filter(),
            log_format = %config.log_format(),
            "function bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "function bootstrap failed"
        );
    }

    fn store_connecting(&self, table: &str) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "store_connecting",
            table,
            "connecting to item store"
        );
    }

    fn store_ready(&self, table: &str) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "store_ready",
            table,
            "item store ready"
        );
    }

    fn store_failed(&self, error: &StoreError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "store_failed",
            error = %error,
            "item store unavailable"
        );
    }
}
