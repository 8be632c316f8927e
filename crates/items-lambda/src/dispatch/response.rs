//! Response envelope returned to the gateway.
//!
//! Every response carries a JSON content type and a body of the form
//! `{"message": ..., "data": ...}`. `data` is left out entirely when an
//! operation has nothing to return. The envelope itself is an
//! [`ApiGatewayProxyResponse`], so header names serialize in lower case.

use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::HeaderMap;
use http::header::{CONTENT_TYPE, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use super::DISPATCH_TARGET;
use super::errors::DispatchError;
use crate::encoding::normalise_numbers;

/// Messages placed in response envelopes.
pub mod messages {
    /// Create succeeded.
    pub const CREATED: &str = "Item created successfully.";
    /// List All succeeded.
    pub const LISTED: &str = "Items listed successfully.";
    /// Get One found the record.
    pub const FOUND: &str = "Item found.";
    /// Update succeeded.
    pub const UPDATED: &str = "Item updated successfully.";
    /// Delete succeeded.
    pub const DELETED: &str = "Item deleted successfully.";
    /// Get One found nothing.
    pub const NOT_FOUND: &str = "Item not found.";
    /// A `POST` or `PUT` arrived without a body.
    pub const EMPTY_BODY: &str = "Error: the request body is empty or invalid.";
    /// A `POST` or `PUT` body did not parse.
    pub const INVALID_JSON: &str = "Error: the body is not valid JSON (check quotes and formatting).";
    /// No route matched the method and path.
    pub const UNSUPPORTED_ROUTE: &str = "Route or method not supported.";
    /// The store, item shaping or rendering failed.
    pub const INTERNAL_ERROR: &str = "Internal server error.";
}

/// Media type of every response body.
const JSON_MEDIA_TYPE: &str = "application/json";

/// Body of every response before serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    /// Human-readable outcome.
    pub message: String,
    /// Operation payload, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Proxy response consumed by the HTTP gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayResponse(ApiGatewayProxyResponse);

impl GatewayResponse {
    /// Builds a response with `message` and an optional payload.
    ///
    /// Payload numbers are rendered by the decimal rule, so `4.0` becomes
    /// `4`. If the payload cannot be rendered the response degrades to a 500
    /// describing the failure.
    #[must_use]
    pub fn new(status_code: u16, message: &str, data: Option<Value>) -> Self {
        match render_body(message, data) {
            Ok(body) => Self::from_parts(status_code, body),
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "response payload not renderable");
                let fallback = ResponseBody {
                    message: error.client_message().to_owned(),
                    data: Some(json!({ "error": error.to_string() })),
                };
                let body = serde_json::to_string(&fallback).unwrap_or_default();
                Self::from_parts(error.status_code(), body)
            }
        }
    }

    /// Builds the response for a failed request.
    ///
    /// Internal errors carry their description in `data.error`; client errors
    /// carry only a message.
    #[must_use]
    pub fn from_error(error: &DispatchError) -> Self {
        let data = error
            .is_internal()
            .then(|| json!({ "error": error.to_string() }));
        Self::new(error.status_code(), error.client_message(), data)
    }

    /// Parses the body back into its envelope.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the body is not a valid envelope.
    pub fn parsed_body(&self) -> Result<ResponseBody, serde_json::Error> {
        serde_json::from_str(self.body())
    }

    /// HTTP status code.
    #[must_use]
    pub fn status_code(&self) -> i64 {
        self.0.status_code
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.0.headers
    }

    /// JSON-encoded [`ResponseBody`], empty if the body is not text.
    #[must_use]
    pub fn body(&self) -> &str {
        match &self.0.body {
            Some(Body::Text(text)) => text.as_str(),
            _ => "",
        }
    }

    fn from_parts(status_code: u16, body: String) -> Self {
        let mut response = ApiGatewayProxyResponse::default();
        response.status_code = i64::from(status_code);
        response
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_MEDIA_TYPE));
        response.body = Some(Body::Text(body));
        Self(response)
    }
}

impl From<DispatchError> for GatewayResponse {
    fn from(error: DispatchError) -> Self {
        Self::from_error(&error)
    }
}

fn render_body(message: &str, mut data: Option<Value>) -> Result<String, DispatchError> {
    if let Some(payload) = data.as_mut() {
        normalise_numbers(payload)?;
    }
    let body = ResponseBody {
        message: message.to_owned(),
        data,
    };
    Ok(serde_json::to_string(&body)?)
}
