use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestSeq = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Search,
    Index,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Search => write!(f, "search"),
            Service::Index => write!(f, "index"),
        }
    }
}

/// One item of the search service's `result` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    pub link: String,
}

/// Body of an indexing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRequest {
    pub source_url: String,
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub indexing_status: Option<String>,
    #[serde(default)]
    pub metadata: Option<UploadMetadata>,
}

/// The subset of the job metadata the portal shows. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadMetadata {
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub chunks_indexed: Option<u64>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SearchCompleted {
        seq: RequestSeq,
        result: Result<Vec<SearchResult>, ApiError>,
    },
    UploadCompleted {
        seq: RequestSeq,
        result: Result<UploadResponse, ApiError>,
    },
    HealthChecked {
        seq: RequestSeq,
        service: Service,
        result: Result<HealthStatus, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    /// Human-readable cause. For `HttpStatus` this is the raw response body.
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    EmptyInput,
    InvalidUrl,
    HttpStatus {
        code: u16,
        /// Message extracted from the error body (`detail`, then `message`).
        detail: Option<String>,
    },
    MalformedResponse,
    Timeout,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::EmptyInput => write!(f, "empty input"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus { code, .. } => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
