//! The key-value store holding items.
//!
//! The dispatcher only sees the [`ItemStore`] port. Production wires in
//! [`DynamoDbItemStore`]; tests and local runs use [`InMemoryItemStore`].
//! Stores are built once per process by a [`StoreProvider`] and shared across
//! invocations behind an `Arc`.

mod attributes;
mod dynamodb;
mod errors;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use items_config::Config;

use crate::item::{Item, ItemId};

pub use self::dynamodb::{DynamoDbItemStore, DynamoDbStoreProvider};
pub use self::errors::{StoreError, StoreOperation};
pub use self::memory::InMemoryItemStore;

/// Tracing target for store operations.
pub(crate) const STORE_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::store");

/// Native operations of the items table.
///
/// Each method maps to exactly one logical store call. None of them check for
/// prior existence: `put` overwrites and `delete` of a missing id succeeds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Writes `item`, replacing any record with the same id.
    async fn put(&self, item: &Item) -> Result<(), StoreError>;

    /// Reads the record with `id`, if any.
    async fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError>;

    /// Reads every record, in whatever order the store yields them.
    async fn scan(&self) -> Result<Vec<Item>, StoreError>;

    /// Removes the record with `id`. Missing records are not an error.
    async fn delete(&self, id: &ItemId) -> Result<(), StoreError>;
}

/// Builds the process-wide store from the resolved configuration.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    /// Connects to the store named by `config`.
    async fn connect(&self, config: &Config) -> Result<Arc<dyn ItemStore>, StoreError>;
}
