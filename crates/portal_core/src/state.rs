use crate::view_model::{self, AppViewModel};
use crate::{SearchHit, Service};

/// Tag attached to every request that reaches the network.
pub type RequestSeq = u64;

/// Display state of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The trimmed query the hits answer.
    pub query: String,
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub job_id: String,
    pub indexing_status: String,
    pub source_url: String,
    pub chunks_indexed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Search,
    Upload,
    Health,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceHealth {
    #[default]
    Unknown,
    Checking,
    Up {
        service: String,
    },
    Down {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SearchPage {
    pub(crate) input: String,
    pub(crate) view: ViewState<SearchOutcome>,
    in_flight: Option<RequestSeq>,
    pending_query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct UploadPage {
    pub(crate) input: String,
    pub(crate) view: ViewState<UploadSummary>,
    in_flight: Option<RequestSeq>,
    pending_source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    search: SearchPage,
    upload: UploadPage,
    search_health: ServiceHealth,
    index_health: ServiceHealth,
    health_round: Option<RequestSeq>,
    last_seq: RequestSeq,
    focus: Page,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            focus: self.focus,
            search: view_model::search_view(&self.search),
            upload: view_model::upload_view(&self.upload),
            health: view_model::health_rows(&self.search_health, &self.index_health),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    ///
    /// Editing an input box alone does not mark the state dirty.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn focus(&self) -> Page {
        self.focus
    }

    pub fn search_view_state(&self) -> &ViewState<SearchOutcome> {
        &self.search.view
    }

    pub fn upload_view_state(&self) -> &ViewState<UploadSummary> {
        &self.upload.view
    }

    pub fn health(&self, service: Service) -> &ServiceHealth {
        match service {
            Service::Search => &self.search_health,
            Service::Index => &self.index_health,
        }
    }

    /// True while any page or probe still waits on the network.
    pub fn is_busy(&self) -> bool {
        self.search.view.is_loading()
            || self.upload.view.is_loading()
            || self.search_health == ServiceHealth::Checking
            || self.index_health == ServiceHealth::Checking
    }

    fn next_seq(&mut self) -> RequestSeq {
        self.last_seq += 1;
        self.last_seq
    }

    fn show(&mut self, page: Page) {
        self.focus = page;
        self.dirty = true;
    }

    pub(crate) fn search_input(&self) -> &str {
        &self.search.input
    }

    pub(crate) fn set_search_input(&mut self, text: String) {
        self.search.input = text;
    }

    /// Moves the search page to `Loading` and supersedes any earlier request.
    pub(crate) fn begin_search(&mut self, query: String) -> RequestSeq {
        let seq = self.next_seq();
        self.search.in_flight = Some(seq);
        self.search.pending_query = query;
        self.search.view = ViewState::Loading;
        self.show(Page::Search);
        seq
    }

    pub(crate) fn reject_search(&mut self, message: &str) {
        self.search.in_flight = None;
        self.search.view = ViewState::Error(message.to_string());
        self.show(Page::Search);
    }

    pub(crate) fn is_current_search(&self, seq: RequestSeq) -> bool {
        self.search.in_flight == Some(seq)
    }

    pub(crate) fn settle_search(&mut self, result: Result<Vec<SearchHit>, String>) {
        self.search.in_flight = None;
        self.search.view = match result {
            Ok(hits) => ViewState::Success(SearchOutcome {
                query: std::mem::take(&mut self.search.pending_query),
                hits,
            }),
            Err(message) => ViewState::Error(message),
        };
        self.show(Page::Search);
    }

    pub(crate) fn upload_input(&self) -> &str {
        &self.upload.input
    }

    pub(crate) fn set_upload_input(&mut self, text: String) {
        self.upload.input = text;
    }

    pub(crate) fn begin_upload(&mut self, source_url: String) -> RequestSeq {
        let seq = self.next_seq();
        self.upload.in_flight = Some(seq);
        self.upload.pending_source = source_url;
        self.upload.view = ViewState::Loading;
        self.show(Page::Upload);
        seq
    }

    pub(crate) fn reject_upload(&mut self, message: &str) {
        self.upload.in_flight = None;
        self.upload.view = ViewState::Error(message.to_string());
        self.show(Page::Upload);
    }

    pub(crate) fn is_current_upload(&self, seq: RequestSeq) -> bool {
        self.upload.in_flight == Some(seq)
    }

    /// The source the in-flight upload was submitted with.
    pub(crate) fn pending_source(&self) -> &str {
        &self.upload.pending_source
    }

    /// Applies a settled upload. Success clears the input box; failure keeps it for editing.
    pub(crate) fn settle_upload(&mut self, result: Result<UploadSummary, String>) {
        self.upload.in_flight = None;
        self.upload.view = match result {
            Ok(summary) => {
                self.upload.input.clear();
                ViewState::Success(summary)
            }
            Err(message) => ViewState::Error(message),
        };
        self.show(Page::Upload);
    }

    /// Starts a probe round for both services; results from older rounds no longer apply.
    pub(crate) fn begin_health_check(&mut self) -> RequestSeq {
        let seq = self.next_seq();
        self.health_round = Some(seq);
        self.search_health = ServiceHealth::Checking;
        self.index_health = ServiceHealth::Checking;
        self.show(Page::Health);
        seq
    }

    pub(crate) fn is_current_health_check(&self, seq: RequestSeq) -> bool {
        self.health_round == Some(seq)
    }

    pub(crate) fn set_health(&mut self, service: Service, health: ServiceHealth) {
        match service {
            Service::Search => self.search_health = health,
            Service::Index => self.index_health = health,
        }
        self.show(Page::Health);
    }
}
