use url::Url;

use crate::search::{is_success, status_error};
use crate::{ApiError, FailureKind, HealthStatus};

const HEALTH_PATH: &str = "/health";

/// Health endpoint for a service: the origin of its configured URL plus `/health`.
pub fn health_url(service_url: &str) -> Result<Url, ApiError> {
    let base = Url::parse(service_url)
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, format!("{service_url}: {err}")))?;
    base.join(HEALTH_PATH)
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, format!("{service_url}: {err}")))
}

pub(crate) fn parse_health_response(status: u16, body: &[u8]) -> Result<HealthStatus, ApiError> {
    if !is_success(status) {
        return Err(status_error(status, body));
    }
    serde_json::from_slice(body).map_err(|err| {
        ApiError::new(
            FailureKind::MalformedResponse,
            format!("unexpected health body: {err}"),
        )
    })
}
