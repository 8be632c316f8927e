//! Error types for request dispatch failures.
//!
//! Every failure a request can meet is a [`DispatchError`]. The dispatcher
//! converts each one into a response at its boundary, so none of them reach
//! the hosting runtime. Client errors carry a fixed message; internal errors
//! also echo their description back in `data.error`.

use thiserror::Error;

use super::response::messages;
use crate::encoding::EncodingError;
use crate::item::{ItemError, ItemId};
use crate::store::StoreError;

/// Errors surfaced while dispatching a gateway request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A `POST` or `PUT` arrived without a body.
    #[error("request body is empty")]
    EmptyBody,

    /// The body of a `POST` or `PUT` is not valid JSON.
    #[error("request body is not valid JSON: {message}")]
    InvalidJson {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Get One found no record.
    #[error("no item with id '{id}'")]
    NotFound { id: ItemId },

    /// No route matches the method and path.
    #[error("unsupported route: {method} {path}")]
    UnsupportedRoute { method: String, path: String },

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The request body could not be shaped into an item.
    #[error(transparent)]
    Item(#[from] ItemError),

    /// The response payload could not be rendered.
    #[error("failed to render response: {0}")]
    Encoding(#[from] EncodingError),

    /// Response serialization failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Creates an invalid JSON error from a serde error.
    pub fn invalid_json(source: serde_json::Error) -> Self {
        Self::InvalidJson {
            message: source.to_string(),
            source,
        }
    }

    /// Creates an unsupported route error.
    pub fn unsupported_route(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self::UnsupportedRoute {
            method: method.into(),
            path: path.into(),
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Malformed requests and unmatched routes are client errors (400). A
    /// missing record is 404. Store, item and rendering failures are 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EmptyBody | Self::InvalidJson { .. } | Self::UnsupportedRoute { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Store(_)
            | Self::Item(_)
            | Self::Encoding(_)
            | Self::SerializeResponse(_) => 500,
        }
    }

    /// Returns `true` for failures the caller did not cause.
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }

    /// Message placed in the response envelope.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::EmptyBody => messages::EMPTY_BODY,
            Self::InvalidJson { .. } => messages::INVALID_JSON,
            Self::NotFound { .. } => messages::NOT_FOUND,
            Self::UnsupportedRoute { .. } => messages::UNSUPPORTED_ROUTE,
            Self::Store(_)
            | Self::Item(_)
            | Self::Encoding(_)
            | Self::SerializeResponse(_) => messages::INTERNAL_ERROR,
        }
    }
}
