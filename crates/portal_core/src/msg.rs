use crate::{Failure, RequestSeq, SearchHit, Service, UploadReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box.
    SearchInputChanged(String),
    /// User submitted the current search box contents.
    SearchSubmitted,
    /// The search request tagged `seq` settled.
    SearchSettled {
        seq: RequestSeq,
        result: Result<Vec<SearchHit>, Failure>,
    },
    /// User edited the file location box.
    UploadInputChanged(String),
    /// User submitted the current file location for indexing.
    UploadSubmitted,
    /// The indexing request tagged `seq` settled.
    UploadSettled {
        seq: RequestSeq,
        result: Result<UploadReceipt, Failure>,
    },
    /// User asked for a health probe of both services.
    HealthCheckRequested,
    /// The health probe round tagged `seq` finished for `service`.
    /// `Ok` carries the service's self-reported name.
    HealthChecked {
        seq: RequestSeq,
        service: Service,
        result: Result<String, Failure>,
    },
}
