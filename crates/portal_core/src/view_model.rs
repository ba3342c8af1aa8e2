use crate::state::{SearchPage, UploadPage};
use crate::{Page, Service, ServiceHealth, ViewState};

pub const MISSING_SNIPPET: &str = "No preview available.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Page touched by the most recent visible change.
    pub focus: Page,
    pub search: SearchViewModel,
    pub upload: UploadViewModel,
    pub health: Vec<HealthRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Information,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

impl Notice {
    fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchViewModel {
    pub input: String,
    pub status: PageStatus,
    pub submit_enabled: bool,
    pub notice: Option<Notice>,
    pub rows: Vec<SearchRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRowView {
    /// 1-based position in the result list.
    pub position: usize,
    pub title: String,
    pub link: String,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadViewModel {
    pub input: String,
    pub status: PageStatus,
    pub submit_enabled: bool,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthRowView {
    pub service: Service,
    pub health: ServiceHealth,
}

fn status_of<T>(view: &ViewState<T>) -> PageStatus {
    match view {
        ViewState::Idle => PageStatus::Idle,
        ViewState::Loading => PageStatus::Loading,
        ViewState::Success(_) => PageStatus::Success,
        ViewState::Error(_) => PageStatus::Error,
    }
}

pub(crate) fn search_view(page: &SearchPage) -> SearchViewModel {
    let (notice, rows) = match &page.view {
        ViewState::Idle => (None, Vec::new()),
        ViewState::Loading => (Some(Notice::new(Severity::Information, "Searching...")), Vec::new()),
        ViewState::Error(message) => (Some(Notice::new(Severity::Error, message.clone())), Vec::new()),
        ViewState::Success(outcome) if outcome.hits.is_empty() => (
            Some(Notice::new(
                Severity::Information,
                format!("No results found for \"{}\".", outcome.query),
            )),
            Vec::new(),
        ),
        ViewState::Success(outcome) => {
            let rows = outcome
                .hits
                .iter()
                .enumerate()
                .map(|(index, hit)| {
                    let position = index + 1;
                    SearchRowView {
                        position,
                        title: non_blank(hit.title.as_deref())
                            .unwrap_or_else(|| format!("Untitled result #{position}")),
                        link: hit.link.clone(),
                        snippet: non_blank(hit.snippet.as_deref())
                            .unwrap_or_else(|| MISSING_SNIPPET.to_string()),
                    }
                })
                .collect();
            (None, rows)
        }
    };

    SearchViewModel {
        input: page.input.clone(),
        status: status_of(&page.view),
        submit_enabled: !page.view.is_loading(),
        notice,
        rows,
    }
}

pub(crate) fn upload_view(page: &UploadPage) -> UploadViewModel {
    let notice = match &page.view {
        ViewState::Idle => None,
        ViewState::Loading => Some(Notice::new(
            Severity::Information,
            "Submitting document for indexing...",
        )),
        ViewState::Error(message) => Some(Notice::new(Severity::Error, message.clone())),
        ViewState::Success(summary) => {
            let mut text = format!(
                "Document submitted for indexing.\nJob ID: {}\nStatus: {}\nSource: {}",
                summary.job_id, summary.indexing_status, summary.source_url
            );
            if let Some(chunks) = summary.chunks_indexed {
                text.push_str(&format!("\nChunks indexed: {chunks}"));
            }
            Some(Notice::new(Severity::Success, text))
        }
    };

    UploadViewModel {
        input: page.input.clone(),
        status: status_of(&page.view),
        submit_enabled: !page.view.is_loading(),
        notice,
    }
}

pub(crate) fn health_rows(search: &ServiceHealth, index: &ServiceHealth) -> Vec<HealthRowView> {
    vec![
        HealthRowView {
            service: Service::Search,
            health: search.clone(),
        },
        HealthRowView {
            service: Service::Index,
            health: index.clone(),
        },
    ]
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}
