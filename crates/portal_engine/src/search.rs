use serde_json::Value;

use crate::{ApiError, FailureKind, SearchResult};

/// Maps a search response to hits.
///
/// A missing or `null` `result` is an empty page; any other non-array value,
/// or an item without a `link`, makes the response malformed.
pub fn parse_search_response(status: u16, body: &[u8]) -> Result<Vec<SearchResult>, ApiError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }

    let value: Value = serde_json::from_slice(body).map_err(|err| {
        ApiError::new(
            FailureKind::MalformedResponse,
            format!("response body is not JSON: {err}"),
        )
    })?;

    let result = match value {
        Value::Object(mut map) => map.remove("result"),
        _ => None,
    };

    match result {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|err| {
                    ApiError::new(
                        FailureKind::MalformedResponse,
                        format!("result item {index} is invalid: {err}"),
                    )
                })
            })
            .collect(),
        Some(other) => Err(ApiError::new(
            FailureKind::MalformedResponse,
            format!("`result` must be an array, got {}", json_kind(&other)),
        )),
    }
}

/// Best-effort server message from an error body: `detail`, then `message`.
///
/// Non-string values (such as a list of validation errors) are returned as compact JSON.
pub fn extract_error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|key| match value.get(*key)? {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        })
}

pub(crate) fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

pub(crate) fn status_error(status: u16, body: &[u8]) -> ApiError {
    ApiError::new(
        FailureKind::HttpStatus {
            code: status,
            detail: extract_error_detail(body),
        },
        String::from_utf8_lossy(body).into_owned(),
    )
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
