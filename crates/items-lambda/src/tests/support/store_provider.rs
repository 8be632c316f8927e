//! Test store provider: hands out a shared in-memory store, records the
//! tables it was asked for, and supports injected connection failures.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use items_config::Config;

use crate::store::{InMemoryItemStore, ItemStore, StoreError, StoreProvider};

/// Store provider that records connection requests.
#[derive(Clone, Default)]
pub struct RecordingStoreProvider {
    store: Arc<InMemoryItemStore>,
    state: Arc<Mutex<ProviderState>>,
}

impl RecordingStoreProvider {
    /// Makes every later connection attempt fail with `message`.
    pub fn refuse_connections(&self, message: impl Into<String>) {
        let mut state = self.state.lock().expect("provider state mutex poisoned");
        state.failure = Some(message.into());
    }

    /// Tables named by connection attempts, in order.
    #[must_use]
    pub fn connected_tables(&self) -> Vec<String> {
        let state = self.state.lock().expect("provider state mutex poisoned");
        state.tables.clone()
    }

    /// The store handed out on successful connections.
    #[must_use]
    pub fn store(&self) -> Arc<InMemoryItemStore> {
        Arc::clone(&self.store)
    }
}

#[async_trait]
impl StoreProvider for RecordingStoreProvider {
    async fn connect(&self, config: &Config) -> Result<Arc<dyn ItemStore>, StoreError> {
        let failure = {
            let mut state = self.state.lock().expect("provider state mutex poisoned");
            state.tables.push(config.table_name().to_owned());
            state.failure.clone()
        };
        if let Some(message) = failure {
            return Err(StoreError::connection(config.table_name(), message));
        }
        Ok(self.store())
    }
}

#[derive(Default)]
struct ProviderState {
    tables: Vec<String>,
    failure: Option<String>,
}
