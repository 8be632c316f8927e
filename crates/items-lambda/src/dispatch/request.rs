//! Inbound gateway events.
//!
//! The gateway forwards a REST proxy event, deserialized as
//! [`ApiGatewayProxyRequest`]. Only the method, path, path parameters and
//! body matter for dispatch; every other field is carried but ignored.

use aws_lambda_events::apigw::ApiGatewayProxyRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::DispatchError;
use crate::item::{ID_FIELD, ItemId};

/// Path suffix naming the item collection.
const COLLECTION_SUFFIX: &str = "/items";

/// HTTP method as the dispatcher understands it.
///
/// Matching is exact: `post` is not `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `POST`
    Post,
    /// `GET`
    Get,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// Anything else.
    Other,
}

impl Method {
    /// Classifies a raw method string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "POST" => Self::Post,
            "GET" => Self::Get,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            _ => Self::Other,
        }
    }

    /// Returns `true` for methods that must carry a JSON body.
    #[must_use]
    pub fn expects_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

/// Proxy event delivered by the HTTP gateway.
///
/// Serializes exactly as the wrapped event does.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct GatewayRequest(ApiGatewayProxyRequest);

impl From<ApiGatewayProxyRequest> for GatewayRequest {
    fn from(event: ApiGatewayProxyRequest) -> Self {
        Self(event)
    }
}

impl GatewayRequest {
    /// Creates a request for `method` on `path` with no parameters or body.
    #[must_use]
    pub fn new(method: http::Method, path: impl Into<String>) -> Self {
        let mut event = ApiGatewayProxyRequest::default();
        event.http_method = method;
        event.path = Some(path.into());
        Self(event)
    }

    /// Sets the `id` path parameter.
    #[must_use]
    pub fn with_path_id(mut self, id: impl Into<String>) -> Self {
        self.0.path_parameters.insert(ID_FIELD.to_owned(), id.into());
        self
    }

    /// Sets the raw body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.0.body = Some(body.into());
        self
    }

    /// The wrapped gateway event.
    #[must_use]
    pub fn event(&self) -> &ApiGatewayProxyRequest {
        &self.0
    }

    /// Raw method text as the gateway sent it.
    #[must_use]
    pub fn raw_method(&self) -> &str {
        self.0.http_method.as_str()
    }

    /// Request path, empty when absent.
    #[must_use]
    pub fn path(&self) -> &str {
        self.0.path.as_deref().unwrap_or_default()
    }

    /// Classified method.
    #[must_use]
    pub fn method(&self) -> Method {
        Method::parse(self.raw_method())
    }

    /// The `id` path parameter. Absent and empty values both count as no
    /// identifier.
    #[must_use]
    pub fn path_id(&self) -> Option<ItemId> {
        self.0
            .path_parameters
            .get(ID_FIELD)
            .and_then(|raw| ItemId::new(raw).ok())
    }

    /// Returns `true` when the path, ignoring trailing slashes, names the
    /// item collection.
    #[must_use]
    pub fn targets_collection(&self) -> bool {
        self.path()
            .trim_end_matches('/')
            .ends_with(COLLECTION_SUFFIX)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::EmptyBody`] when the body is absent or empty,
    /// and [`DispatchError::InvalidJson`] when it does not parse.
    pub fn json_body(&self) -> Result<Value, DispatchError> {
        match self.0.body.as_deref() {
            None | Some("") => Err(DispatchError::EmptyBody),
            Some(raw) => serde_json::from_str(raw).map_err(DispatchError::invalid_json),
        }
    }
}
