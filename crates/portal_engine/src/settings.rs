use std::time::Duration;

/// Page size the search service uses when none (or a non-positive one) is given.
pub const DEFAULT_RESULT_LIMIT: u32 = 20;
/// The only content type the index service accepts.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq)]
pub struct PortalSettings {
    pub search_url: String,
    pub index_url: String,
    pub result_limit: u32,
    pub content_type: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            search_url: "http://localhost:8001/v1/query/documents:search".to_string(),
            index_url: "http://localhost:8000/v1/index/documents".to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            content_type: PDF_CONTENT_TYPE.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl PortalSettings {
    /// Limit sent with every search; zero falls back to the default.
    pub fn effective_limit(&self) -> u32 {
        if self.result_limit == 0 {
            DEFAULT_RESULT_LIMIT
        } else {
            self.result_limit
        }
    }
}
