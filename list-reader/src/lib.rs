//! Read-only Lambda endpoints over the single list record kept in DynamoDB.
//!
//! The `tail` and `head` binaries share one pipeline: fetch the `main_list`
//! record, pick an end of its `items` sequence, and answer in the API Gateway
//! proxy response shape.

pub mod attribute;
pub mod config;
pub mod error;
pub mod handler;
pub mod response;
pub mod runtime;
pub mod store;
