use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use portal_engine::{
    ApiError, ChannelEventSink, EngineEvent, EngineHandle, FailureKind, HealthStatus, PortalApi,
    SearchResult, Service, UploadResponse,
};

/// Answers from canned data and records what it was asked.
#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl PortalApi for FakeApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        self.calls.lock().unwrap().push(format!("search:{query}"));
        Ok(vec![SearchResult {
            title: Some(format!("about {query}")),
            snippet: None,
            link: "https://example.com/doc".to_string(),
        }])
    }

    async fn submit_for_indexing(&self, source_url: &str) -> Result<UploadResponse, ApiError> {
        self.calls.lock().unwrap().push(format!("upload:{source_url}"));
        Err(ApiError {
            kind: FailureKind::HttpStatus {
                code: 404,
                detail: None,
            },
            message: "{}".to_string(),
        })
    }

    async fn health(&self, service: Service) -> Result<HealthStatus, ApiError> {
        self.calls.lock().unwrap().push(format!("health:{service}"));
        Ok(HealthStatus {
            status: "ok".to_string(),
            service: Some(service.to_string()),
        })
    }
}

fn start() -> (EngineHandle, Arc<FakeApi>, mpsc::Receiver<EngineEvent>) {
    let api = Arc::new(FakeApi::default());
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::with_api(api.clone(), Arc::new(ChannelEventSink::new(tx)))
        .expect("engine");
    (engine, api, rx)
}

fn next_event(rx: &mpsc::Receiver<EngineEvent>) -> EngineEvent {
    rx.recv_timeout(Duration::from_secs(5)).expect("engine event")
}

#[test]
fn search_completion_carries_sequence() {
    let (engine, api, rx) = start();
    engine.search(7, "ownership");

    match next_event(&rx) {
        EngineEvent::SearchCompleted { seq, result } => {
            assert_eq!(seq, 7);
            let hits = result.expect("hits");
            assert_eq!(hits[0].title.as_deref(), Some("about ownership"));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(*api.calls.lock().unwrap(), vec!["search:ownership".to_string()]);
}

#[test]
fn upload_failure_is_delivered_as_event() {
    let (engine, _api, rx) = start();
    engine.upload(3, "/docs/a.pdf");

    match next_event(&rx) {
        EngineEvent::UploadCompleted { seq, result } => {
            assert_eq!(seq, 3);
            let err = result.unwrap_err();
            assert!(matches!(err.kind, FailureKind::HttpStatus { code: 404, .. }));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn health_checks_report_each_service() {
    let (engine, _api, rx) = start();
    engine.check_health(6, Service::Search);
    engine.check_health(6, Service::Index);

    let mut services = Vec::new();
    for _ in 0..2 {
        match next_event(&rx) {
            EngineEvent::HealthChecked {
                seq,
                service,
                result,
            } => {
                assert_eq!(seq, 6);
                assert_eq!(result.expect("healthy").status, "ok");
                services.push(service);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    services.sort_by_key(|service| service.to_string());
    assert_eq!(services, vec![Service::Index, Service::Search]);
}
