//! Portal engine: HTTP clients for the search and index services, and effect execution.
mod client;
mod engine;
mod health;
mod index;
mod persist;
mod search;
mod settings;
mod types;

pub use client::{PortalApi, ReqwestPortalApi};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use health::health_url;
pub use index::parse_index_response;
pub use persist::{ensure_parent_dir, write_atomically, PersistError};
pub use search::{extract_error_detail, parse_search_response};
pub use settings::{PortalSettings, DEFAULT_RESULT_LIMIT, PDF_CONTENT_TYPE};
pub use types::{
    ApiError, EngineEvent, FailureKind, HealthStatus, RequestSeq, SearchResult, Service,
    UploadMetadata, UploadRequest, UploadResponse,
};
