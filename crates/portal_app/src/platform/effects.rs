use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use portal_core::{Effect, Failure, Msg, SearchHit, Service, UploadReceipt};
use portal_engine::{
    ApiError, EngineEvent, EngineHandle, EventSink, FailureKind, HealthStatus, PortalSettings,
    SearchResult, UploadResponse,
};
use portal_logging::portal_debug;

use super::app::LoopEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: PortalSettings, tx: mpsc::Sender<LoopEvent>) -> Result<Self> {
        let sink = Arc::new(MsgSink { tx });
        let engine = EngineHandle::new(settings, sink).context("failed to start request engine")?;
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Search { seq, query } => {
                    portal_debug!("Dispatch search seq={} query_len={}", seq, query.len());
                    self.engine.search(seq, query);
                }
                Effect::Upload { seq, source_url } => {
                    portal_debug!("Dispatch upload seq={} source_url={}", seq, source_url);
                    self.engine.upload(seq, source_url);
                }
                Effect::CheckHealth { seq, service } => {
                    self.engine.check_health(seq, engine_service(service));
                }
            }
        }
    }
}

/// Turns engine completions into core messages for the app loop.
struct MsgSink {
    tx: mpsc::Sender<LoopEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(LoopEvent::Core(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SearchCompleted { seq, result } => Msg::SearchSettled {
            seq,
            result: result
                .map(|hits| hits.into_iter().map(map_hit).collect())
                .map_err(map_failure),
        },
        EngineEvent::UploadCompleted { seq, result } => Msg::UploadSettled {
            seq,
            result: result.map(map_receipt).map_err(map_failure),
        },
        EngineEvent::HealthChecked {
            seq,
            service,
            result,
        } => Msg::HealthChecked {
            seq,
            service: core_service(service),
            result: result.map_err(map_failure).and_then(health_name),
        },
    }
}

fn map_hit(hit: SearchResult) -> SearchHit {
    SearchHit {
        title: hit.title,
        snippet: hit.snippet,
        link: hit.link,
    }
}

fn map_receipt(response: UploadResponse) -> UploadReceipt {
    let metadata = response.metadata.unwrap_or_default();
    UploadReceipt {
        job_id: response.job_id,
        indexing_status: response.indexing_status,
        source_url: metadata.source_url,
        chunks_indexed: metadata.chunks_indexed,
    }
}

fn health_name(status: HealthStatus) -> Result<String, Failure> {
    if status.status.eq_ignore_ascii_case("ok") {
        Ok(status.service.unwrap_or(status.status))
    } else {
        Err(Failure::Format(format!(
            "service reported status {:?}",
            status.status
        )))
    }
}

fn map_failure(err: ApiError) -> Failure {
    match err.kind {
        FailureKind::EmptyInput => Failure::Invalid(err.message),
        FailureKind::HttpStatus { code, detail } => Failure::Status {
            code,
            detail,
            body: err.message,
        },
        FailureKind::MalformedResponse => Failure::Format(err.message),
        FailureKind::Timeout => Failure::Transport(format!("request timed out ({})", err.message)),
        FailureKind::InvalidUrl | FailureKind::Network => Failure::Transport(err.message),
    }
}

fn engine_service(service: Service) -> portal_engine::Service {
    match service {
        Service::Search => portal_engine::Service::Search,
        Service::Index => portal_engine::Service::Index,
    }
}

fn core_service(service: portal_engine::Service) -> Service {
    match service {
        portal_engine::Service::Search => Service::Search,
        portal_engine::Service::Index => Service::Index,
    }
}
