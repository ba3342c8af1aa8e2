use portal_logging::portal_debug;

use crate::{AppState, Effect, Failure, Msg, Service, ServiceHealth, UploadReceipt, UploadSummary};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";
pub const EMPTY_SOURCE_MESSAGE: &str = "Please enter a file location to index.";
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";
pub const UNKNOWN_JOB_ID: &str = "N/A";
pub const UNKNOWN_STATUS: &str = "Unknown Status";

const INDEX_UNREACHABLE_NOTE: &str = "Check that the index service is running and reachable; \
a cross-origin (CORS) or proxy policy may also be blocking the request.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::SearchInputChanged(text) => {
            state.set_search_input(text);
            Vec::new()
        }
        Msg::SearchSubmitted => match trimmed(state.search_input()) {
            Some(query) => {
                let seq = state.begin_search(query.clone());
                vec![Effect::Search { seq, query }]
            }
            None => {
                state.reject_search(EMPTY_QUERY_MESSAGE);
                Vec::new()
            }
        },
        Msg::SearchSettled { seq, result } => {
            if state.is_current_search(seq) {
                state.settle_search(result.map_err(|failure| search_failure_message(&failure)));
            } else {
                portal_debug!("Dropping stale search response seq={}", seq);
            }
            Vec::new()
        }
        Msg::UploadInputChanged(text) => {
            state.set_upload_input(text);
            Vec::new()
        }
        Msg::UploadSubmitted => match trimmed(state.upload_input()) {
            Some(source_url) => {
                let seq = state.begin_upload(source_url.clone());
                vec![Effect::Upload { seq, source_url }]
            }
            None => {
                state.reject_upload(EMPTY_SOURCE_MESSAGE);
                Vec::new()
            }
        },
        Msg::UploadSettled { seq, result } => {
            if state.is_current_upload(seq) {
                let settled = match result {
                    Ok(receipt) => Ok(summarize_receipt(receipt, state.pending_source())),
                    Err(failure) => Err(upload_failure_message(&failure)),
                };
                state.settle_upload(settled);
            } else {
                portal_debug!("Dropping stale upload response seq={}", seq);
            }
            Vec::new()
        }
        Msg::HealthCheckRequested => {
            let seq = state.begin_health_check();
            vec![
                Effect::CheckHealth {
                    seq,
                    service: Service::Search,
                },
                Effect::CheckHealth {
                    seq,
                    service: Service::Index,
                },
            ]
        }
        Msg::HealthChecked {
            seq,
            service,
            result,
        } => {
            if state.is_current_health_check(seq) {
                let health = match result {
                    Ok(name) => ServiceHealth::Up { service: name },
                    Err(failure) => ServiceHealth::Down {
                        reason: health_failure_reason(&failure),
                    },
                };
                state.set_health(service, health);
            } else {
                portal_debug!("Dropping stale {} health result seq={}", service, seq);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn trimmed(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn summarize_receipt(receipt: UploadReceipt, submitted: &str) -> UploadSummary {
    UploadSummary {
        job_id: receipt.job_id.unwrap_or_else(|| UNKNOWN_JOB_ID.to_string()),
        indexing_status: receipt
            .indexing_status
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
        source_url: receipt.source_url.unwrap_or_else(|| submitted.to_string()),
        chunks_indexed: receipt.chunks_indexed,
    }
}

fn search_failure_message(failure: &Failure) -> String {
    match failure {
        Failure::Invalid(message) => message.clone(),
        Failure::Status { code, detail, .. } => format!(
            "Search failed (HTTP {code}): {}",
            detail.as_deref().unwrap_or(UNKNOWN_SERVER_ERROR)
        ),
        Failure::Format(message) => format!("Unexpected response format: {message}"),
        Failure::Transport(message) => format!("Could not reach the search service: {message}"),
    }
}

fn upload_failure_message(failure: &Failure) -> String {
    match failure {
        Failure::Invalid(message) => message.clone(),
        Failure::Status { code, body, .. } => {
            let body = if body.trim().is_empty() {
                "<empty body>"
            } else {
                body.as_str()
            };
            format!("Indexing failed (HTTP {code}): {body}")
        }
        Failure::Format(message) => format!("Unexpected response format: {message}"),
        Failure::Transport(message) => format!(
            "Could not reach the index service: {message}. {INDEX_UNREACHABLE_NOTE}"
        ),
    }
}

fn health_failure_reason(failure: &Failure) -> String {
    match failure {
        Failure::Status { code, .. } => format!("HTTP {code}"),
        Failure::Invalid(message) | Failure::Format(message) | Failure::Transport(message) => {
            message.clone()
        }
    }
}
