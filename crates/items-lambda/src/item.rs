//! Schema-less items keyed by a string identifier.
//!
//! An [`Item`] is an open-ended JSON object with exactly one required field,
//! `id`. The identifier is pulled out into an [`ItemId`] so the rest of the
//! crate never has to re-check that it is present, a string, and non-empty.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Name of the primary key attribute.
pub const ID_FIELD: &str = "id";

/// Errors raised while shaping JSON values into items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// The value is not a JSON object.
    #[error("item must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON type of the rejected value.
        found: &'static str,
    },
    /// The object has no `id` field.
    #[error("item is missing the 'id' field")]
    MissingId,
    /// The `id` field is not a string.
    #[error("item 'id' must be a string, found {found}")]
    IdNotAString {
        /// JSON type of the rejected identifier.
        found: &'static str,
    },
    /// The `id` field is an empty string.
    #[error("item 'id' must not be empty")]
    EmptyId,
}

/// Primary key of an item: a non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps a caller-supplied identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::EmptyId`] when `value` is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ItemError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ItemError::EmptyId);
        }
        Ok(Self(value))
    }

    /// Generates a fresh random (v4 UUID) identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrows the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

impl TryFrom<Value> for ItemId {
    type Error = ItemError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Self::new(text),
            other => Err(ItemError::IdNotAString {
                found: json_type(&other),
            }),
        }
    }
}

/// A stored record: the identifier plus every other attribute verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    attributes: Map<String, Value>,
}

impl Item {
    /// Builds an item from an identifier and its remaining attributes.
    ///
    /// Any `id` key inside `attributes` is discarded in favour of `id`.
    #[must_use]
    pub fn new(id: ItemId, mut attributes: Map<String, Value>) -> Self {
        attributes.remove(ID_FIELD);
        Self { id, attributes }
    }

    /// Shapes a create payload, generating an identifier when the payload
    /// carries none.
    ///
    /// An `id` that is present but null, non-string or empty is rejected
    /// rather than replaced.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemError`] when the payload is not an object or carries
    /// an unusable `id`.
    pub fn from_create_payload(payload: Value) -> Result<Self, ItemError> {
        let mut attributes = into_object(payload)?;
        let id = match attributes.remove(ID_FIELD) {
            Some(raw) => ItemId::try_from(raw)?,
            None => ItemId::generate(),
        };
        Ok(Self { id, attributes })
    }

    /// Shapes a full-replacement payload for `id`. Whatever `id` the payload
    /// carries is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NotAnObject`] when the payload is not an object.
    pub fn from_replacement_payload(id: ItemId, payload: Value) -> Result<Self, ItemError> {
        into_object(payload).map(|attributes| Self::new(id, attributes))
    }

    /// Identifier of the item.
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Attributes other than the identifier.
    #[must_use]
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Converts the item back into a JSON object including its `id`.
    #[must_use]
    pub fn into_value(self) -> Value {
        let mut object = self.attributes;
        object.insert(ID_FIELD.to_owned(), Value::String(self.id.0));
        Value::Object(object)
    }
}

impl TryFrom<Value> for Item {
    type Error = ItemError;

    /// Reads a stored record, which must already carry a valid `id`.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut attributes = into_object(value)?;
        let id = attributes
            .remove(ID_FIELD)
            .ok_or(ItemError::MissingId)
            .and_then(ItemId::try_from)?;
        Ok(Self { id, attributes })
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        item.into_value()
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>, ItemError> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(ItemError::NotAnObject {
            found: json_type(&other),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
