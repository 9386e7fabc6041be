use std::collections::HashMap;
use std::future::Future;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::Value;

use crate::attribute::{to_json, AttributeError};
use crate::config::Config;

/// Fixed identifier of the one list record.
pub const LIST_ID: &str = "main_list";
/// Partition key attribute of the list table.
pub const LIST_KEY_ATTRIBUTE: &str = "list_id";
pub const ITEMS_ATTRIBUTE: &str = "items";

/// The stored list, with its items already converted to JSON
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListRecord {
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
    #[error("{0}")]
    DataShape(String),
}

impl From<AttributeError> for StoreError {
    fn from(error: AttributeError) -> Self {
        StoreError::DataShape(error.to_string())
    }
}

/// Read access to the list record; `Ok(None)` means no record exists.
pub trait ListStore {
    fn fetch_list(
        &self,
        list_id: &str,
    ) -> impl Future<Output = Result<Option<ListRecord>, StoreError>> + Send;
}

#[derive(Debug, Clone)]
pub struct DynamoDbListStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoDbListStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build the client from the default AWS credential and region chain
    pub async fn from_config(config: &Config) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(
            aws_sdk_dynamodb::Client::new(&aws_config),
            config.table_name.clone(),
        )
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl ListStore for DynamoDbListStore {
    async fn fetch_list(&self, list_id: &str) -> Result<Option<ListRecord>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(self.table_name.clone())
            .key(LIST_KEY_ATTRIBUTE, AttributeValue::S(list_id.to_string()))
            .send()
            .await
            .map_err(|error| {
                StoreError::Backend(format!(
                    "DynamoDB get_item on {} failed: {}",
                    self.table_name,
                    DisplayErrorContext(&error)
                ))
            })?;

        output.item().map(record_from_item).transpose()
    }
}

/// Decode a raw item. A missing `items` attribute reads as an empty list.
pub fn record_from_item(item: &HashMap<String, AttributeValue>) -> Result<ListRecord, StoreError> {
    let items = match item.get(ITEMS_ATTRIBUTE) {
        None => Vec::new(),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(to_json)
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(StoreError::DataShape(format!(
                "attribute `{ITEMS_ATTRIBUTE}` is not a list"
            )))
        }
    };

    Ok(ListRecord { items })
}
