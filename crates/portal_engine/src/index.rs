use serde_json::Value;

use crate::search::{is_success, json_kind, status_error};
use crate::{ApiError, FailureKind, UploadResponse};

/// Maps an indexing response to the job receipt.
///
/// Any non-2xx status is a failure carrying the raw body. A 2xx body must be a JSON object.
pub fn parse_index_response(status: u16, body: &[u8]) -> Result<UploadResponse, ApiError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }

    let value: Value = serde_json::from_slice(body).map_err(|err| {
        ApiError::new(
            FailureKind::MalformedResponse,
            format!("response body is not JSON: {err}"),
        )
    })?;
    if !value.is_object() {
        return Err(ApiError::new(
            FailureKind::MalformedResponse,
            format!("expected a JSON object, got {}", json_kind(&value)),
        ));
    }

    serde_json::from_value(value).map_err(|err| {
        ApiError::new(
            FailureKind::MalformedResponse,
            format!("unexpected job receipt: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_receipt_is_parsed() {
        let body = br#"{
            "job_id": "9b1d",
            "indexing_status": "completed",
            "metadata": {"file_path": "/docs/a.pdf", "chunks_indexed": 14, "correlation_id": "c-1"}
        }"#;
        let response = parse_index_response(200, body).unwrap();
        assert_eq!(response.job_id.as_deref(), Some("9b1d"));
        assert_eq!(response.indexing_status.as_deref(), Some("completed"));
        let metadata = response.metadata.unwrap();
        assert_eq!(metadata.source_url, None);
        assert_eq!(metadata.file_path.as_deref(), Some("/docs/a.pdf"));
        assert_eq!(metadata.chunks_indexed, Some(14));
    }

    #[test]
    fn empty_object_is_a_receipt_with_defaults() {
        assert_eq!(
            parse_index_response(202, b"{}").unwrap(),
            UploadResponse::default()
        );
    }

    #[test]
    fn non_object_success_body_is_malformed() {
        let err = parse_index_response(200, b"[]").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
        let err = parse_index_response(200, b"ok").unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedResponse);
    }

    #[test]
    fn failure_keeps_raw_body() {
        let body = br#"{"detail":"File not found: /tmp/x.pdf"}"#;
        let err = parse_index_response(404, body).unwrap_err();
        assert!(matches!(err.kind, FailureKind::HttpStatus { code: 404, .. }));
        assert_eq!(err.message, String::from_utf8_lossy(body));
    }
}
