use std::sync::{mpsc, Arc};
use std::thread;

use portal_logging::{portal_info, portal_warn};

use crate::client::{PortalApi, ReqwestPortalApi};
use crate::{ApiError, EngineEvent, PortalSettings, RequestSeq, Service};

/// Receives engine events on whichever thread finished the request.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
}

enum EngineCommand {
    Search { seq: RequestSeq, query: String },
    Upload { seq: RequestSeq, source_url: String },
    CheckHealth { seq: RequestSeq, service: Service },
}

/// Runs requests on a background tokio runtime.
///
/// Every command is spawned independently; nothing is cancelled or deduplicated,
/// so callers must match completions by sequence number.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: PortalSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let api = Arc::new(ReqwestPortalApi::new(settings)?);
        Self::with_api(api, sink)
    }

    pub fn with_api(api: Arc<dyn PortalApi>, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, sink.as_ref()).await;
                });
            }
            portal_info!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self { cmd_tx })
    }

    pub fn search(&self, seq: RequestSeq, query: impl Into<String>) {
        self.send(EngineCommand::Search {
            seq,
            query: query.into(),
        });
    }

    pub fn upload(&self, seq: RequestSeq, source_url: impl Into<String>) {
        self.send(EngineCommand::Upload {
            seq,
            source_url: source_url.into(),
        });
    }

    pub fn check_health(&self, seq: RequestSeq, service: Service) {
        self.send(EngineCommand::CheckHealth { seq, service });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            portal_warn!("Engine thread is gone; dropping command");
        }
    }
}

async fn handle_command(api: &dyn PortalApi, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Search { seq, query } => {
            portal_info!("Search seq={} query={:?}", seq, query);
            let result = api.search(&query).await;
            match &result {
                Ok(hits) => portal_info!("Search seq={} returned {} hits", seq, hits.len()),
                Err(err) => portal_warn!("Search seq={} failed: {}", seq, err),
            }
            sink.emit(EngineEvent::SearchCompleted { seq, result });
        }
        EngineCommand::Upload { seq, source_url } => {
            portal_info!("Upload seq={} source_url={}", seq, source_url);
            let result = api.submit_for_indexing(&source_url).await;
            match &result {
                Ok(response) => portal_info!(
                    "Upload seq={} accepted job_id={:?} status={:?}",
                    seq,
                    response.job_id,
                    response.indexing_status
                ),
                Err(err) => portal_warn!("Upload seq={} failed: {}", seq, err),
            }
            sink.emit(EngineEvent::UploadCompleted { seq, result });
        }
        EngineCommand::CheckHealth { seq, service } => {
            let result = api.health(service).await;
            if let Err(err) = &result {
                portal_warn!("Health check seq={} for {} service failed: {}", seq, service, err);
            }
            sink.emit(EngineEvent::HealthChecked {
                seq,
                service,
                result,
            });
        }
    }
}
