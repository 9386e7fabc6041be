use crate::store::StoreError;

/// Message returned for every failure the caller cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Why a list read did not produce an item
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ListError {
    #[error("Main list not found")]
    MissingRecord,
    #[error("List is empty")]
    EmptyList,
    #[error("store request failed: {0}")]
    Backend(String),
    #[error("malformed list record: {0}")]
    DataShape(String),
}

impl ListError {
    pub fn status_code(&self) -> u16 {
        match self {
            ListError::MissingRecord | ListError::EmptyList => 404,
            ListError::Backend(_) | ListError::DataShape(_) => 500,
        }
    }

    /// Message safe to hand back to the caller; internal detail stays in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            ListError::MissingRecord => "Main list not found",
            ListError::EmptyList => "List is empty",
            ListError::Backend(_) | ListError::DataShape(_) => INTERNAL_ERROR_MESSAGE,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<StoreError> for ListError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Backend(detail) => ListError::Backend(detail),
            StoreError::DataShape(detail) => ListError::DataShape(detail),
        }
    }
}
