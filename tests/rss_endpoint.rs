//! End-to-end tests for the `/rss` endpoint.
//!
//! Each test builds the real router over a `FeedFilterService` whose source
//! points at a wiremock upstream, then drives it with `oneshot` requests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rss_proxy::{
    config::{AuthConfig, Config, SourceConfig, UpstreamConfig, WebConfig},
    services::FeedFilterService,
    web::{AppState, WebServer},
};

const FEED: &str = "<rss version=\"2.0\"><channel>\
    <title>Test Feed</title>\
    <link>https://example.com</link>\
    <description>Releases</description>\
    <item><title>First</title><size>1.2 GB</size></item>\
    <item><title>Second</title><size>500 MB</size></item>\
    <item><title>Third</title><size>800MB</size></item>\
    </channel></rss>";

fn test_config(feed_url: &str) -> Config {
    let mut sources = HashMap::new();
    sources.insert(
        "nyaa".to_string(),
        SourceConfig {
            feed_url: feed_url.to_string(),
            size_field: "size".to_string(),
            size_pattern: r"(\d+(?:\.\d+)?)\s*(GB|GiB|MB|MiB)".to_string(),
            min_size_mib: Some(700.0),
            max_size_mib: Some(1500.0),
        },
    );

    Config {
        web: WebConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        auth: AuthConfig {
            password: "secret".to_string(),
        },
        upstream: UpstreamConfig::default(),
        sources,
    }
}

fn build_app(feed_url: &str) -> Router {
    let config = test_config(feed_url);
    let service = FeedFilterService::from_config(&config).unwrap();
    WebServer::create_router(AppState {
        service: Arc::new(service),
    })
}

async fn send_request(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string());
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, content_type, String::from_utf8(body_bytes.to_vec()).unwrap())
}

fn error_message(body: &str) -> String {
    let json: Value = serde_json::from_str(body).unwrap();
    json["error"].as_str().unwrap().to_string()
}

async fn mock_upstream(feed_body: &str, status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss"))
        .respond_with(ResponseTemplate::new(status).set_body_string(feed_body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_missing_parameters_return_400() {
    let app = build_app("https://unused.example.com/rss");

    for uri in [
        "/rss",
        "/rss?source=nyaa",
        "/rss?key=secret",
        "/rss?source=&key=secret",
        "/rss?source=nyaa&key=",
    ] {
        let (status, _, body) = send_request(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
        assert_eq!(
            error_message(&body),
            "Both 'source' and 'key' parameters are required"
        );
    }
}

#[tokio::test]
async fn test_wrong_key_returns_403_regardless_of_source() {
    let app = build_app("https://unused.example.com/rss");

    for uri in ["/rss?source=nyaa&key=wrong", "/rss?source=bogus&key=wrong"] {
        let (status, _, body) = send_request(&app, uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "uri: {uri}");
        assert_eq!(error_message(&body), "Invalid key");
    }
}

#[tokio::test]
async fn test_unknown_source_returns_404() {
    let app = build_app("https://unused.example.com/rss");

    let (status, _, body) = send_request(&app, "/rss?source=other&key=secret").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "Source 'other' not found");
}

#[tokio::test]
async fn test_filtered_feed_keeps_only_qualifying_items() {
    let upstream = mock_upstream(FEED, 200).await;
    let app = build_app(&format!("{}/rss", upstream.uri()));

    let (status, content_type, body) = send_request(&app, "/rss?source=nyaa&key=secret").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        content_type.as_deref(),
        Some("application/xml; charset=utf-8")
    );

    // 1.2 GB (1228.8 MiB) and 800 MB are in [700, 1500]; 500 MB is not.
    assert!(body.starts_with("<rss version=\"2.0\">"));
    assert!(body.contains("<title>First</title>"));
    assert!(!body.contains("<title>Second</title>"));
    assert!(body.contains("<title>Third</title>"));

    // Channel metadata survives unchanged, before the items.
    assert!(body.contains("<title>Test Feed</title>"));
    assert!(body.contains("<link>https://example.com</link>"));
    assert!(body.contains("<description>Releases</description>"));
    let metadata_pos = body.find("<title>Test Feed</title>").unwrap();
    let first_item_pos = body.find("<item>").unwrap();
    assert!(metadata_pos < first_item_pos);
}

#[tokio::test]
async fn test_item_order_is_preserved() {
    let upstream = mock_upstream(FEED, 200).await;
    let app = build_app(&format!("{}/rss", upstream.uri()));

    let (_, _, body) = send_request(&app, "/rss?source=nyaa&key=secret").await;

    let first = body.find("<title>First</title>").unwrap();
    let third = body.find("<title>Third</title>").unwrap();
    assert!(first < third);
}

#[tokio::test]
async fn test_upstream_error_status_is_mirrored() {
    let upstream = mock_upstream("service down", 503).await;
    let app = build_app(&format!("{}/rss", upstream.uri()));

    let (status, _, body) = send_request(&app, "/rss?source=nyaa&key=secret").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        error_message(&body),
        "Failed to fetch data from source 'nyaa': 503"
    );
}

#[tokio::test]
async fn test_feed_without_items_returns_404() {
    let empty_feed = "<rss version=\"2.0\"><channel><title>Empty</title></channel></rss>";
    let upstream = mock_upstream(empty_feed, 200).await;
    let app = build_app(&format!("{}/rss", upstream.uri()));

    let (status, _, body) = send_request(&app, "/rss?source=nyaa&key=secret").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_message(&body), "No items found in source 'nyaa'");
}

#[tokio::test]
async fn test_malformed_upstream_xml_returns_500() {
    let upstream = mock_upstream("<rss><channel><item>", 200).await;
    let app = build_app(&format!("{}/rss", upstream.uri()));

    let (status, _, body) = send_request(&app, "/rss?source=nyaa&key=secret").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).starts_with("Failed to parse feed from source 'nyaa':"));
}

#[tokio::test]
async fn test_unreachable_upstream_returns_500() {
    // Nothing listens on this port; the connection is refused immediately.
    let app = build_app("http://127.0.0.1:9/rss");

    let (status, _, body) = send_request(&app, "/rss?source=nyaa&key=secret").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error_message(&body).starts_with("HTTP request failed for source 'nyaa':"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = build_app("https://unused.example.com/rss");

    let (status, _, body) = send_request(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}
