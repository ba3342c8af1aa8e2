use std::error::Error as _;

use portal_logging::{portal_debug, portal_info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;

use crate::health::{health_url, parse_health_response};
use crate::{
    parse_index_response, parse_search_response, ApiError, FailureKind, HealthStatus,
    PortalSettings, SearchResult, Service, UploadRequest, UploadResponse,
};

const JSON: &str = "application/json";

/// The two document services plus their health probes.
#[async_trait::async_trait]
pub trait PortalApi: Send + Sync {
    /// Runs a search. Blank queries fail with `EmptyInput` before any request is sent.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError>;

    /// Asks the index service to ingest the document at `source_url`.
    async fn submit_for_indexing(&self, source_url: &str) -> Result<UploadResponse, ApiError>;

    async fn health(&self, service: Service) -> Result<HealthStatus, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestPortalApi {
    settings: PortalSettings,
    client: reqwest::Client,
}

impl ReqwestPortalApi {
    pub fn new(settings: PortalSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn search_url(&self, query: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.settings.search_url).map_err(|err| {
            ApiError::new(
                FailureKind::InvalidUrl,
                format!("{}: {err}", self.settings.search_url),
            )
        })?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("limit", &self.settings.effective_limit().to_string());
        Ok(url)
    }

    fn index_url(&self) -> Result<Url, ApiError> {
        Url::parse(&self.settings.index_url).map_err(|err| {
            ApiError::new(
                FailureKind::InvalidUrl,
                format!("{}: {err}", self.settings.index_url),
            )
        })
    }
}

#[async_trait::async_trait]
impl PortalApi for ReqwestPortalApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::new(FailureKind::EmptyInput, "search query is empty"));
        }
        let url = self.search_url(query)?;
        portal_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let (status, body) = read_body(response).await?;
        portal_info!("Search answered status={} bytes={}", status, body.len());
        parse_search_response(status, &body)
    }

    async fn submit_for_indexing(&self, source_url: &str) -> Result<UploadResponse, ApiError> {
        let source_url = source_url.trim();
        if source_url.is_empty() {
            return Err(ApiError::new(FailureKind::EmptyInput, "file location is empty"));
        }
        let url = self.index_url()?;
        let request = UploadRequest {
            source_url: source_url.to_string(),
            content_type: self.settings.content_type.clone(),
        };
        let payload = serde_json::to_vec(&request).map_err(|err| {
            ApiError::new(
                FailureKind::Network,
                format!("could not encode request: {err}"),
            )
        })?;
        portal_debug!("POST {} source_url={}", url, request.source_url);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let (status, body) = read_body(response).await?;
        portal_info!("Index answered status={} bytes={}", status, body.len());
        parse_index_response(status, &body)
    }

    async fn health(&self, service: Service) -> Result<HealthStatus, ApiError> {
        let service_url = match service {
            Service::Search => &self.settings.search_url,
            Service::Index => &self.settings.index_url,
        };
        let url = health_url(service_url)?;
        portal_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let (status, body) = read_body(response).await?;
        parse_health_response(status, &body)
    }
}

async fn read_body(response: reqwest::Response) -> Result<(u16, Vec<u8>), ApiError> {
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(map_reqwest_error)?;
    Ok((status, body.to_vec()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    let message = error_chain(&err);
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, message);
    }
    if err.is_builder() {
        return ApiError::new(FailureKind::InvalidUrl, message);
    }
    ApiError::new(FailureKind::Network, message)
}

/// Joins the error with its sources; reqwest keeps the useful part ("connection refused") there.
fn error_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
