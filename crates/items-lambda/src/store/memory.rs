//! In-memory item store for tests and local runs.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ItemStore, StoreError};
use crate::item::{Item, ItemId};

/// Item store backed by an ordered map.
///
/// Numbers are kept exactly as written, so rendering follows the same path as
/// records read back from the real table.
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<BTreeMap<ItemId, Item>>,
}

impl InMemoryItemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `items`. Later duplicates win.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns `true` when the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        self.items
            .write()
            .await
            .insert(item.id().clone(), item.clone());
        Ok(())
    }

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: &ItemId) -> Result<(), StoreError> {
        self.items.write().await.remove(id);
        Ok(())
    }
}
