//! Dispatcher that turns gateway requests into store operations.
//!
//! [`Dispatcher::handle`] is the only error boundary: every failure becomes a
//! response, so invocations never fail at the runtime level.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::DISPATCH_TARGET;
use super::errors::DispatchError;
use super::request::GatewayRequest;
use super::response::{GatewayResponse, messages};
use super::router::Route;
use crate::item::{Item, ItemId};
use crate::store::ItemStore;

/// Outcome of a successful operation.
struct Outcome {
    status_code: u16,
    message: &'static str,
    data: Option<Value>,
}

impl Outcome {
    fn new(status_code: u16, message: &'static str, data: Option<Value>) -> Self {
        Self {
            status_code,
            message,
            data,
        }
    }
}

/// Routes requests onto a shared item store.
///
/// Cloning is cheap; clones share the store.
#[derive(Clone)]
pub struct Dispatcher {
    store: Arc<dyn ItemStore>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a dispatcher over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Handles one request to completion.
    pub async fn handle(&self, request: &GatewayRequest) -> GatewayResponse {
        debug!(
            target: DISPATCH_TARGET,
            method = request.raw_method(),
            path = request.path(),
            "dispatching request"
        );

        match self.dispatch(request).await {
            Ok(outcome) => GatewayResponse::new(outcome.status_code, outcome.message, outcome.data),
            Err(error) if error.is_internal() => {
                warn!(target: DISPATCH_TARGET, %error, "request failed");
                GatewayResponse::from_error(&error)
            }
            Err(error) => {
                debug!(target: DISPATCH_TARGET, %error, "request rejected");
                GatewayResponse::from_error(&error)
            }
        }
    }

    async fn dispatch(&self, request: &GatewayRequest) -> Result<Outcome, DispatchError> {
        match Route::resolve(request)? {
            Route::Create(payload) => self.create(payload).await,
            Route::ListAll => self.list_all().await,
            Route::GetOne(id) => self.get_one(id).await,
            Route::Update(id, payload) => self.update(id, payload).await,
            Route::Delete(id) => self.delete(&id).await,
        }
    }

    async fn create(&self, payload: Value) -> Result<Outcome, DispatchError> {
        let item = Item::from_create_payload(payload)?;
        self.store.put(&item).await?;
        Ok(Outcome::new(201, messages::CREATED, Some(item.into_value())))
    }

    async fn list_all(&self) -> Result<Outcome, DispatchError> {
        let items = self.store.scan().await?;
        let data = items.into_iter().map(Item::into_value).collect();
        Ok(Outcome::new(200, messages::LISTED, Some(Value::Array(data))))
    }

    async fn get_one(&self, id: ItemId) -> Result<Outcome, DispatchError> {
        match self.store.get(&id).await? {
            Some(item) => Ok(Outcome::new(200, messages::FOUND, Some(item.into_value()))),
            None => Err(DispatchError::NotFound { id }),
        }
    }

    async fn update(&self, id: ItemId, payload: Value) -> Result<Outcome, DispatchError> {
        let item = Item::from_replacement_payload(id, payload)?;
        self.store.put(&item).await?;
        Ok(Outcome::new(200, messages::UPDATED, Some(item.into_value())))
    }

    async fn delete(&self, id: &ItemId) -> Result<Outcome, DispatchError> {
        self.store.delete(id).await?;
        Ok(Outcome::new(200, messages::DELETED, None))
    }
}
