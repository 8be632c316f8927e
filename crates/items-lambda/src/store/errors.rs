//! Errors raised by store adapters.

use std::fmt;

use thiserror::Error;

use crate::encoding::EncodingError;
use crate::item::ItemError;

/// Store operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    /// Single-item write.
    Put,
    /// Single-item read.
    Get,
    /// Full-table read.
    Scan,
    /// Single-item removal.
    Delete,
}

impl fmt::Display for StoreOperation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Put => "PutItem",
            Self::Get => "GetItem",
            Self::Scan => "Scan",
            Self::Delete => "DeleteItem",
        };
        formatter.write_str(label)
    }
}

/// Errors surfaced by [`ItemStore`](super::ItemStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected or failed a request.
    #[error("{operation} on table '{table}' failed: {message}")]
    Request {
        /// Operation that failed.
        operation: StoreOperation,
        /// Table the operation targeted.
        table: String,
        /// Description reported by the store client.
        message: String,
    },
    /// A stored attribute has a type items cannot represent as JSON.
    #[error("attribute '{attribute}' has unsupported type {kind}")]
    UnsupportedAttribute {
        /// Name of the attribute.
        attribute: String,
        /// Store-side type tag of the attribute.
        kind: &'static str,
    },
    /// A stored record does not form a valid item.
    #[error("stored record is not a valid item: {0}")]
    MalformedItem(#[from] ItemError),
    /// A stored number cannot be rendered as JSON.
    #[error("stored number is not renderable: {0}")]
    Encoding(#[from] EncodingError),
    /// The store client could not be built.
    #[error("failed to connect to table '{table}': {message}")]
    Connection {
        /// Table the connection targeted.
        table: String,
        /// Description of the failure.
        message: String,
    },
}

impl StoreError {
    /// Creates a request failure.
    pub fn request(
        operation: StoreOperation,
        table: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Request {
            operation,
            table: table.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported attribute error.
    pub fn unsupported_attribute(attribute: impl Into<String>, kind: &'static str) -> Self {
        Self::UnsupportedAttribute {
            attribute: attribute.into(),
            kind,
        }
    }

    /// Creates a connection error.
    pub fn connection(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Connection {
            table: table.into(),
            message: message.into(),
        }
    }
}
