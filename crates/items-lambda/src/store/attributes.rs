//! Conversion between items and DynamoDB attribute maps.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Value};

use super::StoreError;
use crate::encoding::decimal_number;
use crate::item::{ID_FIELD, Item, ItemId};

/// Converts an item into the attribute map written by `PutItem`.
pub(crate) fn item_to_attributes(item: &Item) -> HashMap<String, AttributeValue> {
    let mut attributes: HashMap<String, AttributeValue> = item
        .attributes()
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute(value)))
        .collect();
    attributes.insert(ID_FIELD.to_owned(), id_attribute(item.id()));
    attributes
}

/// Key attribute addressing a single item.
pub(crate) fn id_attribute(id: &ItemId) -> AttributeValue {
    AttributeValue::S(id.as_str().to_owned())
}

/// Rebuilds an item from an attribute map returned by `GetItem` or `Scan`.
pub(crate) fn item_from_attributes(
    attributes: &HashMap<String, AttributeValue>,
) -> Result<Item, StoreError> {
    let mut object = Map::new();
    for (name, value) in attributes {
        object.insert(name.clone(), from_attribute(name, value)?);
    }
    Ok(Item::try_from(Value::Object(object))?)
}

fn to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(elements) => AttributeValue::L(elements.iter().map(to_attribute).collect()),
        Value::Object(fields) => AttributeValue::M(
            fields
                .iter()
                .map(|(name, field)| (name.clone(), to_attribute(field)))
                .collect(),
        ),
    }
}

fn from_attribute(name: &str, value: &AttributeValue) -> Result<Value, StoreError> {
    let converted = match value {
        AttributeValue::S(text) => Value::String(text.clone()),
        AttributeValue::N(raw) => Value::Number(decimal_number(raw)?),
        AttributeValue::Bool(flag) => Value::Bool(*flag),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(elements) => Value::Array(
            elements
                .iter()
                .map(|element| from_attribute(name, element))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(fields) => {
            let mut object = Map::new();
            for (field_name, field) in fields {
                object.insert(field_name.clone(), from_attribute(field_name, field)?);
            }
            Value::Object(object)
        }
        AttributeValue::Ss(texts) => Value::Array(texts.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(raws) => Value::Array(
            raws.iter()
                .map(|raw| decimal_number(raw).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::B(_) => return Err(StoreError::unsupported_attribute(name, "B")),
        AttributeValue::Bs(_) => return Err(StoreError::unsupported_attribute(name, "BS")),
        _ => return Err(StoreError::unsupported_attribute(name, "unknown")),
    };
    Ok(converted)
}
