use std::net::TcpListener;

use portal_engine::{
    FailureKind, PortalApi, PortalSettings, ReqwestPortalApi, Service, UploadMetadata,
    UploadResponse,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> ReqwestPortalApi {
    let settings = PortalSettings {
        search_url: format!("{}/v1/query/search", server.uri()),
        index_url: format!("{}/v1/index/documents", server.uri()),
        ..PortalSettings::default()
    };
    ReqwestPortalApi::new(settings).expect("client")
}

#[tokio::test]
async fn upload_posts_source_and_pdf_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/index/documents"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "source_url": "file:///home/x/a.pdf",
            "content_type": "application/pdf"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "42",
            "indexing_status": "queued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = api_for(&server)
        .submit_for_indexing(" file:///home/x/a.pdf ")
        .await
        .expect("upload ok");

    assert_eq!(
        response,
        UploadResponse {
            job_id: Some("42".to_string()),
            indexing_status: Some("queued".to_string()),
            metadata: None,
        }
    );
}

#[tokio::test]
async fn upload_keeps_metadata_and_ignores_unknown_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/index/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "a1",
            "indexing_status": "completed",
            "metadata": {
                "source_url": "/srv/a.pdf",
                "chunks_indexed": 3,
                "extra": {"nested": true}
            }
        })))
        .mount(&server)
        .await;

    let response = api_for(&server)
        .submit_for_indexing("/srv/a.pdf")
        .await
        .expect("upload ok");

    assert_eq!(
        response.metadata,
        Some(UploadMetadata {
            source_url: Some("/srv/a.pdf".to_string()),
            chunks_indexed: Some(3),
            ..UploadMetadata::default()
        })
    );
}

#[tokio::test]
async fn upload_failure_keeps_raw_body() {
    let server = MockServer::start().await;
    let body = json!({"detail": "File not found: /nope.pdf"});
    Mock::given(method("POST"))
        .and(path("/v1/index/documents"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let err = api_for(&server)
        .submit_for_indexing("/nope.pdf")
        .await
        .unwrap_err();

    assert!(matches!(err.kind, FailureKind::HttpStatus { code: 404, .. }));
    let raw: serde_json::Value = serde_json::from_str(&err.message).expect("raw json body");
    assert_eq!(raw, body);
}

#[tokio::test]
async fn blank_source_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = api_for(&server).submit_for_indexing("   ").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::EmptyInput);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let settings = PortalSettings {
        index_url: format!("http://127.0.0.1:{port}/v1/index/documents"),
        ..PortalSettings::default()
    };

    let err = ReqwestPortalApi::new(settings)
        .expect("client")
        .submit_for_indexing("/a.pdf")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn health_probe_hits_service_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "ok", "service": "Index Service"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let index = api.health(Service::Index).await.expect("index health");
    let search = api.health(Service::Search).await.expect("search health");
    assert_eq!(index.status, "ok");
    assert_eq!(search.service.as_deref(), Some("Index Service"));
}

#[tokio::test]
async fn failing_health_probe_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server).health(Service::Search).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::HttpStatus {
            code: 500,
            detail: None
        }
    );
}
