//! Route selection for gateway requests.
//!
//! Routing looks at the method, whether the path names the item collection,
//! and whether an `id` path parameter is present. Rules are tried in order
//! and the first match wins:
//!
//! | Method   | Condition                          | Route      |
//! | -------- | ---------------------------------- | ---------- |
//! | `POST`   | path ends with `/items`            | Create     |
//! | `GET`    | path ends with `/items`, no `id`   | List All   |
//! | `GET`    | `id` present                       | Get One    |
//! | `PUT`    | `id` present                       | Update     |
//! | `DELETE` | `id` present                       | Delete     |
//!
//! Anything else is an unsupported route. Bodies of `POST` and `PUT` are
//! validated before routing, so a malformed body wins over a bad route.

use serde_json::Value;
use tracing::debug;

use super::errors::DispatchError;
use super::request::{GatewayRequest, Method};
use crate::item::ItemId;

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_CRATE_NAME"), "::dispatch");

/// Operation selected for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// Store the body as a new item.
    Create(Value),
    /// Return every item.
    ListAll,
    /// Return the item with this id.
    GetOne(ItemId),
    /// Replace the item with this id by the body.
    Update(ItemId, Value),
    /// Remove the item with this id.
    Delete(ItemId),
}

impl Route {
    /// Selects the route for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::EmptyBody`] or [`DispatchError::InvalidJson`]
    /// when a `POST` or `PUT` body is unusable, and
    /// [`DispatchError::UnsupportedRoute`] when no rule matches.
    pub fn resolve(request: &GatewayRequest) -> Result<Self, DispatchError> {
        let method = request.method();
        let body = if method.expects_body() {
            Some(request.json_body()?)
        } else {
            None
        };
        let collection = request.targets_collection();

        let route = match (method, request.path_id(), body) {
            (Method::Post, _, Some(body)) if collection => Self::Create(body),
            (Method::Get, None, _) if collection => Self::ListAll,
            (Method::Get, Some(id), _) => Self::GetOne(id),
            (Method::Put, Some(id), Some(body)) => Self::Update(id, body),
            (Method::Delete, Some(id), _) => Self::Delete(id),
            _ => {
                return Err(DispatchError::unsupported_route(
                    request.raw_method(),
                    request.path(),
                ));
            }
        };

        debug!(
            target: DISPATCH_TARGET,
            route = route.name(),
            path = request.path(),
            "resolved route"
        );
        Ok(route)
    }

    /// Short name of the operation, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::ListAll => "list_all",
            Self::GetOne(_) => "get_one",
            Self::Update(..) => "update",
            Self::Delete(_) => "delete",
        }
    }
}
