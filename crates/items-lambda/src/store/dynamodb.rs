//! DynamoDB-backed item store.

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use items_config::Config;
use tracing::debug;

use super::attributes::{id_attribute, item_from_attributes, item_to_attributes};
use super::{ItemStore, STORE_TARGET, StoreError, StoreOperation, StoreProvider};
use crate::item::{ID_FIELD, Item, ItemId};

/// Item store over a single DynamoDB table keyed by the string `id`.
#[derive(Debug, Clone)]
pub struct DynamoDbItemStore {
    client: Client,
    table: String,
}

impl DynamoDbItemStore {
    /// Wraps a configured client for `table`.
    #[must_use]
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Name of the backing table.
    #[must_use]
    pub fn table(&self) -> &str {
        self.table.as_str()
    }

    fn failure<E>(&self, operation: StoreOperation, error: &E) -> StoreError
    where
        E: std::error::Error,
    {
        StoreError::request(
            operation,
            self.table.as_str(),
            DisplayErrorContext(error).to_string(),
        )
    }
}

#[async_trait]
impl ItemStore for DynamoDbItemStore {
    async fn put(&self, item: &Item) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(|error| self.failure(StoreOperation::Put, &error))?;
        Ok(())
    }

    async fn get(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(ID_FIELD, id_attribute(id))
            .send()
            .await
            .map_err(|error| self.failure(StoreOperation::Get, &error))?;
        output.item().map(item_from_attributes).transpose()
    }

    /// Follows `LastEvaluatedKey` until the table is exhausted, so callers
    /// always receive the complete listing.
    async fn scan(&self) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::new();
        let mut start_key = None;
        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|error| self.failure(StoreOperation::Scan, &error))?;

            for attributes in output.items() {
                items.push(item_from_attributes(attributes)?);
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => {
                    debug!(
                        target: STORE_TARGET,
                        table = %self.table,
                        collected = items.len(),
                        "scan continues on next page"
                    );
                    start_key = Some(key.clone());
                }
                _ => break,
            }
        }
        Ok(items)
    }

    async fn delete(&self, id: &ItemId) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(ID_FIELD, id_attribute(id))
            .send()
            .await
            .map_err(|error| self.failure(StoreOperation::Delete, &error))?;
        Ok(())
    }
}

/// Provider that loads the AWS shared configuration and connects to the
/// configured table.
#[derive(Debug, Default, Clone, Copy)]
pub struct DynamoDbStoreProvider;

#[async_trait]
impl StoreProvider for DynamoDbStoreProvider {
    async fn connect(&self, config: &Config) -> Result<Arc<dyn ItemStore>, StoreError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.region() {
            loader = loader.region(Region::new(region.to_owned()));
        }
        let sdk_config = loader.load().await;
        debug!(
            target: STORE_TARGET,
            table = config.table_name(),
            region = ?sdk_config.region(),
            "store client configured"
        );
        let client = Client::new(&sdk_config);
        Ok(Arc::new(DynamoDbItemStore::new(client, config.table_name())))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use aws_sdk_dynamodb::operation::delete_item::DeleteItemOutput;
    use aws_sdk_dynamodb::operation::get_item::GetItemOutput;
    use aws_sdk_dynamodb::operation::put_item::PutItemOutput;
    use aws_sdk_dynamodb::operation::scan::{ScanError, ScanOutput};
    use aws_sdk_dynamodb::types::AttributeValue;
    use aws_sdk_dynamodb::types::error::ResourceNotFoundException;
    use aws_smithy_mocks::{mock, mock_client};
    use serde_json::json;

    use super::*;

    const TABLE: &str = "Usuarios";

    fn record(id: &str, age: &str) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (ID_FIELD.to_owned(), AttributeValue::S(id.to_owned())),
            ("age".to_owned(), AttributeValue::N(age.to_owned())),
        ])
    }

    fn key_is(key: Option<&HashMap<String, AttributeValue>>, id: &str) -> bool {
        key.and_then(|key| key.get(ID_FIELD)) == Some(&AttributeValue::S(id.to_owned()))
    }

    fn item_id(raw: &str) -> ItemId {
        ItemId::new(raw).expect("id")
    }

    #[tokio::test]
    async fn scan_follows_pagination_to_the_end() {
        let first_page = mock!(Client::scan)
            .match_requests(|req| req.table_name() == Some(TABLE) && req.exclusive_start_key().is_none())
            .then_output(|| {
                ScanOutput::builder()
                    .items(record("1", "30"))
                    .last_evaluated_key(ID_FIELD, AttributeValue::S("1".to_owned()))
                    .build()
            });
        let second_page = mock!(Client::scan)
            .match_requests(|req| key_is(req.exclusive_start_key(), "1"))
            .then_output(|| ScanOutput::builder().items(record("2", "41.50")).build());
        let client = mock_client!(aws_sdk_dynamodb, [&first_page, &second_page]);

        let items = DynamoDbItemStore::new(client, TABLE)
            .scan()
            .await
            .expect("scan succeeds");

        let listed: Vec<_> = items.into_iter().map(Item::into_value).collect();
        assert_eq!(
            listed,
            vec![json!({"id": "1", "age": 30}), json!({"id": "2", "age": 41.5})]
        );
        assert_eq!(first_page.num_calls(), 1);
        assert_eq!(second_page.num_calls(), 1);
    }

    #[tokio::test]
    async fn get_addresses_the_id_attribute() {
        let lookup = mock!(Client::get_item)
            .match_requests(|req| req.table_name() == Some(TABLE) && key_is(req.key(), "7"))
            .then_output(|| GetItemOutput::builder().set_item(Some(record("7", "4.00"))).build());
        let client = mock_client!(aws_sdk_dynamodb, [&lookup]);

        let item = DynamoDbItemStore::new(client, TABLE)
            .get(&item_id("7"))
            .await
            .expect("get succeeds")
            .expect("item present");

        assert_eq!(item.into_value(), json!({"id": "7", "age": 4}));
        assert_eq!(lookup.num_calls(), 1);
    }

    #[tokio::test]
    async fn get_of_an_absent_item_is_none() {
        let lookup = mock!(Client::get_item).then_output(|| GetItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&lookup]);

        let item = DynamoDbItemStore::new(client, TABLE)
            .get(&item_id("missing"))
            .await
            .expect("get succeeds");

        assert!(item.is_none());
    }

    #[tokio::test]
    async fn put_writes_the_whole_record() {
        let write = mock!(Client::put_item)
            .match_requests(|req| {
                req.table_name() == Some(TABLE)
                    && req.item() == Some(&record("42", "3"))
            })
            .then_output(|| PutItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&write]);
        let item = Item::from_create_payload(json!({"id": "42", "age": 3})).expect("item");

        DynamoDbItemStore::new(client, TABLE)
            .put(&item)
            .await
            .expect("put succeeds");

        assert_eq!(write.num_calls(), 1);
    }

    #[tokio::test]
    async fn delete_addresses_the_id_attribute() {
        let removal = mock!(Client::delete_item)
            .match_requests(|req| req.table_name() == Some(TABLE) && key_is(req.key(), "gone"))
            .then_output(|| DeleteItemOutput::builder().build());
        let client = mock_client!(aws_sdk_dynamodb, [&removal]);

        DynamoDbItemStore::new(client, TABLE)
            .delete(&item_id("gone"))
            .await
            .expect("delete succeeds");

        assert_eq!(removal.num_calls(), 1);
    }

    #[tokio::test]
    async fn service_errors_name_the_operation_and_table() {
        let failing = mock!(Client::scan).then_error(|| {
            ScanError::ResourceNotFoundException(
                ResourceNotFoundException::builder()
                    .message("missing table")
                    .build(),
            )
        });
        let client = mock_client!(aws_sdk_dynamodb, [&failing]);

        let error = DynamoDbItemStore::new(client, TABLE)
            .scan()
            .await
            .expect_err("scan fails");

        match error {
            StoreError::Request {
                operation,
                table,
                message,
            } => {
                assert_eq!(operation, StoreOperation::Scan);
                assert_eq!(table, TABLE);
                assert!(message.contains("ResourceNotFoundException"), "message: {message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
