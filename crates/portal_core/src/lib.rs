//! Portal core: pure page state machines and view-model helpers.
mod effect;
mod msg;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, Page, RequestSeq, SearchOutcome, ServiceHealth, UploadSummary, ViewState,
};
pub use types::{Failure, SearchHit, Service, UploadReceipt};
pub use update::{
    update, EMPTY_QUERY_MESSAGE, EMPTY_SOURCE_MESSAGE, UNKNOWN_JOB_ID, UNKNOWN_SERVER_ERROR,
    UNKNOWN_STATUS,
};
pub use view_model::{
    AppViewModel, HealthRowView, Notice, PageStatus, SearchRowView, SearchViewModel, Severity,
    UploadViewModel, MISSING_SNIPPET,
};
