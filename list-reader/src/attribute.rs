use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose, Engine as _};
use serde_json::{Map, Number, Value};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AttributeError {
    #[error("number attribute {0:?} is not representable as JSON")]
    InvalidNumber(String),
    #[error("unsupported attribute value type")]
    Unsupported,
}

/// Convert a DynamoDB attribute value into the JSON value returned to callers
pub fn to_json(value: &AttributeValue) -> Result<Value, AttributeError> {
    match value {
        AttributeValue::S(text) => Ok(Value::String(text.clone())),
        AttributeValue::N(number) => parse_number(number).map(Value::Number),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .iter()
            .map(to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(entries) => entries
            .iter()
            .map(|(key, value)| Ok::<_, AttributeError>((key.clone(), to_json(value)?)))
            .collect::<Result<Map<String, Value>, _>>()
            .map(Value::Object),
        AttributeValue::Ss(set) => Ok(Value::Array(
            set.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::Ns(set) => set
            .iter()
            .map(|number| parse_number(number).map(Value::Number))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(blob) => Ok(Value::String(
            general_purpose::STANDARD.encode(blob),
        )),
        AttributeValue::Bs(blobs) => Ok(Value::Array(
            blobs
                .iter()
                .map(|blob| Value::String(general_purpose::STANDARD.encode(blob)))
                .collect(),
        )),
        _ => Err(AttributeError::Unsupported),
    }
}

// DynamoDB ships numbers as decimal strings of up to 38 digits; keep every digit.
fn parse_number(raw: &str) -> Result<Number, AttributeError> {
    serde_json::from_str::<Number>(raw.trim())
        .map_err(|_| AttributeError::InvalidNumber(raw.to_string()))
}
