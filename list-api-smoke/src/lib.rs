//! Black-box checks against a deployed list API.
//!
//! Each check issues `GET {API_URL}/{endpoint}` with the API key header and
//! expects a 200 whose body names the endpoint as its `operation` and carries
//! an `item` field. Nothing is retried.

use std::time::Duration;

use serde_json::Value;
use tracing::info;

pub const API_URL_VAR: &str = "API_URL";
pub const API_KEY_VAR: &str = "API_KEY";
pub const API_KEY_HEADER: &str = "x-api-key";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoints checked by the runner, in order.
pub const ENDPOINTS: [&str; 2] = ["head", "tail"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SmokeError {
    #[error("{0} environment variable not set")]
    MissingVar(&'static str),
    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("/{endpoint} returned status {status}, expected 200")]
    Status { endpoint: String, status: u16 },
    #[error("/{endpoint} body is not JSON: {source}")]
    Body {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("/{endpoint} returned operation {found}, expected {endpoint:?}")]
    Operation { endpoint: String, found: Value },
    #[error("/{endpoint} response has no item field")]
    MissingItem { endpoint: String },
}

impl SmokeConfig {
    pub fn from_env() -> Result<Self, SmokeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SmokeError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(SmokeError::MissingVar(key))
        };

        Ok(Self {
            api_url: required(API_URL_VAR)?,
            api_key: required(API_KEY_VAR)?,
        })
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), endpoint)
    }
}

/// HTTP client with the fixed per-request timeout
pub fn smoke_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}

pub fn ensure_ok(endpoint: &str, status: u16) -> Result<(), SmokeError> {
    if status == 200 {
        Ok(())
    } else {
        Err(SmokeError::Status {
            endpoint: endpoint.to_string(),
            status,
        })
    }
}

pub fn validate_body(endpoint: &str, body: &Value) -> Result<(), SmokeError> {
    match body.get("operation") {
        Some(Value::String(operation)) if operation == endpoint => {}
        found => {
            return Err(SmokeError::Operation {
                endpoint: endpoint.to_string(),
                found: found.cloned().unwrap_or(Value::Null),
            })
        }
    }

    if body.get("item").is_none() {
        return Err(SmokeError::MissingItem {
            endpoint: endpoint.to_string(),
        });
    }

    Ok(())
}

/// Run one endpoint check and hand back the parsed body
pub async fn check_endpoint(
    client: &reqwest::Client,
    config: &SmokeConfig,
    endpoint: &str,
) -> Result<Value, SmokeError> {
    let url = config.endpoint_url(endpoint);
    let request_error = |source: reqwest::Error| SmokeError::Request {
        url: url.clone(),
        source,
    };

    let response = client
        .get(&url)
        .header(API_KEY_HEADER, config.api_key.as_str())
        .send()
        .await
        .map_err(request_error)?;

    ensure_ok(endpoint, response.status().as_u16())?;

    let text = response.text().await.map_err(request_error)?;
    let body: Value = serde_json::from_str(&text).map_err(|source| SmokeError::Body {
        endpoint: endpoint.to_string(),
        source,
    })?;
    validate_body(endpoint, &body)?;

    info!(endpoint, "Endpoint check passed");
    Ok(body)
}
