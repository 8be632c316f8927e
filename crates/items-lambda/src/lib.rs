//! CRUD function for a key-value table behind an HTTP gateway.
//!
//! The function receives proxy events from the gateway, picks one of five
//! operations (create, list all, get one, update, delete) from the method and
//! path, runs it against the items table, and answers with a JSON envelope.
//! Configuration comes from [`items_config`]; the table is DynamoDB in
//! production and an in-memory map in tests.
//!
//! Cold starts run [`bootstrap_with`], which loads configuration, installs
//! structured telemetry and connects the store once per process. Health
//! reporting hooks emit an event at each stage so a failed cold start is
//! easy to diagnose from the logs. The returned [`Function`] then serves
//! invocations through the Lambda runtime.
//!
//! ## Numbers
//!
//! The table stores numbers as decimals. Responses render a number with no
//! fractional part as an integer and anything else as a plain decimal; the
//! [`encoding`] module holds that rule.

mod bootstrap;
pub mod dispatch;
pub mod encoding;
mod health;
pub mod item;
pub mod store;
mod telemetry;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Function, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{DispatchError, Dispatcher, GatewayRequest, GatewayResponse};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use item::{Item, ItemError, ItemId};
pub use store::{DynamoDbStoreProvider, InMemoryItemStore, ItemStore, StoreError, StoreProvider};
pub use telemetry::{TelemetryError, TelemetryHandle};

#[cfg(test)]
mod tests;
