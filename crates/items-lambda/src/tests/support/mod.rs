//! Test harness utilities for the behavioural suites.

mod config_loader;
mod reporter;
mod store_provider;
mod world;

pub use config_loader::{BlankTableLoader, FailingConfigLoader, TEST_TABLE, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use store_provider::RecordingStoreProvider;
pub use world::{TestWorld, runtime, world};
