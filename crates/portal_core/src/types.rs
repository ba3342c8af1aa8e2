use std::fmt;

/// One document surfaced by the search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: Option<String>,
    pub snippet: Option<String>,
    pub link: String,
}

/// What the index service reported for an accepted document.
///
/// Every field is optional on the wire; defaults are applied when the
/// receipt is folded into page state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadReceipt {
    pub job_id: Option<String>,
    pub indexing_status: Option<String>,
    pub source_url: Option<String>,
    pub chunks_indexed: Option<u64>,
}

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

/// Why a request did not produce a usable payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The request was refused before it was sent.
    Invalid(String),
    /// The service answered with a non-2xx status.
    Status {
        code: u16,
        /// Best-effort message the service put in its error body.
        detail: Option<String>,
        /// Raw error body as received.
        body: String,
    },
    /// A 2xx body did not have the expected shape.
    Format(String),
    /// No response was received (connect error, timeout, bad URL).
    Transport(String),
}
