use lambda_runtime::{Error, LambdaEvent};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::ListError;
use crate::response::ApiResponse;
use crate::store::{ListStore, LIST_ID};

/// Which end of the list an endpoint returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEnd {
    Head,
    Tail,
}

impl ListEnd {
    pub fn operation(self) -> &'static str {
        match self {
            ListEnd::Head => "head",
            ListEnd::Tail => "tail",
        }
    }

    fn take(self, mut items: Vec<Value>) -> Option<Value> {
        match self {
            ListEnd::Head => items.into_iter().next(),
            ListEnd::Tail => items.pop(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub operation: &'static str,
    pub item: Value,
    pub total_items: usize,
}

impl ListItem {
    pub fn to_json(&self) -> Value {
        json!({
            "operation": self.operation,
            "item": self.item,
            "total_items": self.total_items,
        })
    }
}

/// Fetch the list record and pick one end of it
pub async fn read_list_end<S: ListStore>(store: &S, end: ListEnd) -> Result<ListItem, ListError> {
    let record = store
        .fetch_list(LIST_ID)
        .await?
        .ok_or(ListError::MissingRecord)?;

    let total_items = record.items.len();
    let item = end.take(record.items).ok_or(ListError::EmptyList)?;

    Ok(ListItem {
        operation: end.operation(),
        item,
        total_items,
    })
}

/// Lambda handler function. The event payload is ignored and every outcome,
/// failures included, is answered with a response.
pub async fn function_handler<S: ListStore>(
    store: &S,
    end: ListEnd,
    event: LambdaEvent<Value>,
) -> Result<ApiResponse, Error> {
    let request_id = event.context.request_id;

    match read_list_end(store, end).await {
        Ok(found) => {
            info!(
                request_id = %request_id,
                operation = found.operation,
                total_items = found.total_items,
                "Returning list {}",
                found.operation
            );
            Ok(ApiResponse::json(200, &found.to_json()))
        }
        Err(list_error) => {
            if list_error.is_internal() {
                error!(request_id = %request_id, "Failed to read {}: {}", LIST_ID, list_error);
            } else {
                info!(request_id = %request_id, "{}", list_error);
            }
            Ok(ApiResponse::from(&list_error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ListRecord, StoreError};
    use lambda_runtime::Context;

    enum FakeStore {
        Missing,
        Items(Vec<Value>),
        Failing(StoreError),
    }

    impl ListStore for FakeStore {
        async fn fetch_list(&self, list_id: &str) -> Result<Option<ListRecord>, StoreError> {
            assert_eq!(list_id, LIST_ID);
            match self {
                FakeStore::Missing => Ok(None),
                FakeStore::Items(items) => Ok(Some(ListRecord {
                    items: items.clone(),
                })),
                FakeStore::Failing(error) => Err(error.clone()),
            }
        }
    }

    fn event() -> LambdaEvent<Value> {
        LambdaEvent::new(json!({"ignored": true}), Context::default())
    }

    async fn invoke(store: &FakeStore, end: ListEnd) -> (u16, Value) {
        let response = function_handler(store, end, event()).await.unwrap();
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        (response.status_code, response.body_json().unwrap())
    }

    #[tokio::test]
    async fn tail_returns_last_item_and_count() {
        let store = FakeStore::Items(vec![json!("a"), json!("b"), json!("c")]);
        let (status, body) = invoke(&store, ListEnd::Tail).await;
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({"operation": "tail", "item": "c", "total_items": 3})
        );
    }

    #[tokio::test]
    async fn tail_of_single_item_list() {
        let store = FakeStore::Items(vec![json!({"id": 7})]);
        let (status, body) = invoke(&store, ListEnd::Tail).await;
        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({"operation": "tail", "item": {"id": 7}, "total_items": 1})
        );
    }

    #[tokio::test]
    async fn head_returns_first_item() {
        let store = FakeStore::Items(vec![json!(1), json!(2), json!(3)]);
        let (status, body) = invoke(&store, ListEnd::Head).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({"operation": "head", "item": 1, "total_items": 3}));
    }

    #[tokio::test]
    async fn null_item_is_still_an_item() {
        let store = FakeStore::Items(vec![json!("a"), Value::Null]);
        let (status, body) = invoke(&store, ListEnd::Tail).await;
        assert_eq!(status, 200);
        assert_eq!(body["item"], Value::Null);
        assert_eq!(body["total_items"], json!(2));
    }

    #[tokio::test]
    async fn empty_list_is_not_found() {
        let store = FakeStore::Items(Vec::new());
        for end in [ListEnd::Head, ListEnd::Tail] {
            let (status, body) = invoke(&store, end).await;
            assert_eq!(status, 404);
            assert_eq!(body, json!({"error": "List is empty"}));
        }
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (status, body) = invoke(&FakeStore::Missing, ListEnd::Tail).await;
        assert_eq!(status, 404);
        assert_eq!(body, json!({"error": "Main list not found"}));
    }

    #[tokio::test]
    async fn backend_failure_is_answered_with_500() {
        let store = FakeStore::Failing(StoreError::Backend(
            "DynamoDB get_item on lists failed: throttled".into(),
        ));
        let (status, body) = invoke(&store, ListEnd::Tail).await;
        assert_eq!(status, 500);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn data_shape_failure_is_answered_with_500() {
        let store = FakeStore::Failing(StoreError::DataShape(
            "attribute `items` is not a list".into(),
        ));
        let (status, body) = invoke(&store, ListEnd::Tail).await;
        assert_eq!(status, 500);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let store = FakeStore::Items(vec![json!("x"), json!("y")]);
        let first = function_handler(&store, ListEnd::Tail, event()).await.unwrap();
        let second = function_handler(&store, ListEnd::Tail, event()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn read_list_end_reports_error_kind() {
        assert_eq!(
            read_list_end(&FakeStore::Missing, ListEnd::Head).await,
            Err(ListError::MissingRecord)
        );
        assert_eq!(
            read_list_end(&FakeStore::Items(Vec::new()), ListEnd::Head).await,
            Err(ListError::EmptyList)
        );
    }
}
