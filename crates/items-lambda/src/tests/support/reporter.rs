//! Test double for [`HealthReporter`] that records structured events for assertions.

use std::sync::Mutex;

use items_config::Config;

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::store::StoreError;

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded { table: String },
    BootstrapFailed(String),
    StoreConnecting(String),
    StoreReady(String),
    StoreFailed(String),
}

/// Records health events for assertions.
#[derive(Debug, Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    pub fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded {
            table: config.table_name().to_owned(),
        });
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn store_connecting(&self, table: &str) {
        self.record(HealthEvent::StoreConnecting(table.to_owned()));
    }

    fn store_ready(&self, table: &str) {
        self.record(HealthEvent::StoreReady(table.to_owned()));
    }

    fn store_failed(&self, error: &StoreError) {
        self.record(HealthEvent::StoreFailed(error.to_string()));
    }
}
