//! Tests for the HTTP client module

use super::*;
use crate::error::Error;
use crate::types::Method;
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(2));
    assert!(config.user_agent.starts_with("button-request/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(5))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_outgoing_request_builder() {
    let request = OutgoingRequest::new(Method::POST, "http://localhost/x")
        .header("Content-Type", "text/plain")
        .body("hi");

    assert_eq!(request.method, Method::POST);
    assert_eq!(
        request.headers.get("content-type"),
        Some(&"text/plain".to_string())
    );
    assert_eq!(request.body.as_deref(), Some("hi"));
}

#[tokio::test]
async fn test_send_get() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(r#"{"ok": true}"#),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let request = OutgoingRequest::new(Method::GET, format!("{}/status", mock_server.uri()));
    let reply = client.send(&request).await.unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.content_type.as_deref(), Some("application/json"));
    assert_eq!(reply.text, r#"{"ok": true}"#);
}

#[tokio::test]
async fn test_send_post_with_body_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("content-type", "application/xml"))
        .and(header("x-token", "abc"))
        .and(body_string("<item/>"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let request = OutgoingRequest::new(Method::POST, format!("{}/items", mock_server.uri()))
        .header("content-type", "application/xml")
        .header("x-token", "abc")
        .body("<item/>");
    let reply = client.send(&request).await.unwrap();

    assert_eq!(reply.status, 201);
    assert_eq!(reply.text, "created");
}

#[tokio::test]
async fn test_reply_summary_names_status_and_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(502).set_body_raw("<html>bad gateway</html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let reply = client
        .send(&OutgoingRequest::new(Method::GET, mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(reply.content_type.as_deref(), Some("text/html"));
    assert_eq!(reply.summary(), "status 502, content-type text/html");

    let bare = Reply {
        status: 200,
        content_type: None,
        text: String::new(),
    };
    assert_eq!(bare.summary(), "status 200, content-type none");
}

#[tokio::test]
async fn test_error_status_is_still_a_reply() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&mock_server)
        .await;

    let client = HttpClient::new().unwrap();
    let reply = client
        .send(&OutgoingRequest::new(Method::GET, mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(reply.status, 503);
    assert_eq!(reply.text, "down");
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    let err = client
        .send(&OutgoingRequest::new(Method::GET, mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { timeout_ms: 50 }));
}
