//! Tests for request module

use super::*;
use crate::convert::ConverterRegistry;
use crate::error::Error;
use crate::http::HttpClient;
use crate::types::{FormatTag, Method};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn action() -> RequestAction {
    RequestAction::new(
        HttpClient::new().unwrap(),
        Arc::new(ConverterRegistry::new()),
    )
}

// ============================================================================
// Settings Tests
// ============================================================================

#[test]
fn test_settings_defaults() {
    let settings: RequestSettings = serde_json::from_str(r#"{"url": "http://x"}"#).unwrap();
    assert_eq!(settings.http_method, Method::GET);
    assert_eq!(settings.headers, "{}");
    assert_eq!(settings.reply_type, FormatTag::Json);
    assert_eq!(settings.body_type, FormatTag::Json);
    assert_eq!(settings.keys, "");
    assert_eq!(settings.auto_fetch, 0);
}

#[test]
fn test_settings_validate() {
    assert!(RequestSettings::default().validate().is_ok());
    assert!(RequestSettings::get("http://localhost:8080/x").validate().is_ok());

    let err = RequestSettings::get("not a url").validate().unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));

    let err = RequestSettings::get("http://x")
        .with_auto_fetch(MAX_AUTO_FETCH_SECS + 1)
        .validate()
        .unwrap_err();
    assert!(matches!(err, Error::Config { .. }));

    let err = RequestSettings::get("http://x")
        .with_body("x", FormatTag::Ignore)
        .validate()
        .unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_effective_body() {
    let post = RequestSettings::get("http://x")
        .with_method(Method::POST)
        .with_body("  {\"a\": 1}\n", FormatTag::Json);
    assert_eq!(post.effective_body(), Some("{\"a\": 1}"));

    let get = post.clone().with_method(Method::GET);
    assert_eq!(get.effective_body(), None);

    let blank = post.with_body("   ", FormatTag::Json);
    assert_eq!(blank.effective_body(), None);
}

// ============================================================================
// Header Parsing Tests
// ============================================================================

#[test]
fn test_parse_headers_lowercases_names() {
    let headers = parse_headers(r#"{"Authorization": "Bearer t", "X-Count": 3}"#).unwrap();
    assert_eq!(headers.get("authorization"), Some(&"Bearer t".to_string()));
    assert_eq!(headers.get("x-count"), Some(&"3".to_string()));
    assert_eq!(headers.len(), 2);
}

#[test]
fn test_parse_headers_blank() {
    assert!(parse_headers("").unwrap().is_empty());
    assert!(parse_headers("  \n").unwrap().is_empty());
    assert!(parse_headers("{}").unwrap().is_empty());
}

#[test]
fn test_parse_headers_invalid() {
    for text in ["{", "[1, 2]", "\"x\"", "Authorization: x"] {
        let err = parse_headers(text).unwrap_err();
        assert!(matches!(err, Error::InvalidHeaders { .. }), "{text}");
    }
}

// ============================================================================
// Prepare Tests
// ============================================================================

#[test]
fn test_prepare_requires_url() {
    let err = action().prepare(&RequestSettings::default()).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_prepare_sets_content_type_from_body_format() {
    let settings = RequestSettings::get("http://x")
        .with_method(Method::PUT)
        .with_body("<a/>", FormatTag::Xml);
    let request = action().prepare(&settings).unwrap();

    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.body.as_deref(), Some("<a/>"));
    assert_eq!(
        request.headers.get("content-type"),
        Some(&"application/xml".to_string())
    );
}

#[test]
fn test_prepare_keeps_explicit_content_type() {
    let settings = RequestSettings::get("http://x")
        .with_method(Method::POST)
        .with_headers(r#"{"Content-Type": "application/vnd.custom+json"}"#)
        .with_body("{}", FormatTag::Json);
    let request = action().prepare(&settings).unwrap();

    assert_eq!(
        request.headers.get("content-type"),
        Some(&"application/vnd.custom+json".to_string())
    );
}

#[test]
fn test_prepare_without_body_has_no_content_type() {
    let settings = RequestSettings::get("http://x").with_body("{\"a\": 1}", FormatTag::Json);
    let request = action().prepare(&settings).unwrap();

    assert_eq!(request.body, None);
    assert!(request.headers.get("content-type").is_none());
}

#[test]
fn test_prepare_plain_text_body() {
    let settings = RequestSettings::get("http://x")
        .with_method(Method::POST)
        .with_body("on", FormatTag::PlainText);
    let request = action().prepare(&settings).unwrap();

    assert_eq!(
        request.headers.get("content-type"),
        Some(&"text/plain".to_string())
    );
}

// ============================================================================
// Send Tests
// ============================================================================

#[tokio::test]
async fn test_send_label_from_json() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"current": {"temp": 18}}"#),
        )
        .mount(&mock_server)
        .await;

    let settings = RequestSettings::get(format!("{}/weather", mock_server.uri()))
        .with_reply(FormatTag::Json, "current.temp");

    assert_eq!(
        action().send(&settings).await,
        Outcome::Label("18".to_string())
    );
}

#[tokio::test]
async fn test_send_missing_key_is_unchanged() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"a": 1}"#))
        .mount(&mock_server)
        .await;

    let settings = RequestSettings::get(mock_server.uri()).with_reply(FormatTag::Json, "b");
    assert_eq!(action().send(&settings).await, Outcome::Unchanged);
}

#[tokio::test]
async fn test_send_decode_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let settings = RequestSettings::get(mock_server.uri()).with_reply(FormatTag::Json, "a");
    let err = action().fire(&settings).await.unwrap_err();
    assert!(err.is_decode());
    assert!(action().send(&settings).await.is_failed());
}

#[tokio::test]
async fn test_send_empty_url_fails() {
    assert!(action().send(&RequestSettings::default()).await.is_failed());
}

#[tokio::test]
async fn test_send_bad_headers_fails() {
    let settings = RequestSettings::get("http://127.0.0.1:9").with_headers("{");
    assert!(action().send(&settings).await.is_failed());
}

#[tokio::test]
async fn test_send_post_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/toggle"))
        .and(header("content-type", "application/json"))
        .and(header("x-api-key", "k"))
        .and(body_string(r#"{"on": true}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("done\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = RequestSettings::get(format!("{}/toggle", mock_server.uri()))
        .with_method(Method::POST)
        .with_headers(r#"{"X-Api-Key": "k"}"#)
        .with_body(r#"{"on": true}"#, FormatTag::Json)
        .with_reply(FormatTag::PlainText, "");

    assert_eq!(
        action().send(&settings).await,
        Outcome::Label("done".to_string())
    );
}

#[tokio::test]
async fn test_send_ignore_reply() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let settings = RequestSettings::get(mock_server.uri())
        .with_method(Method::DELETE)
        .with_reply(FormatTag::Ignore, "");
    assert_eq!(action().send(&settings).await, Outcome::Unchanged);
}

// ============================================================================
// Auto-Fetch Tests
// ============================================================================

#[test]
fn test_auto_fetch_disabled() {
    let mut auto = AutoFetch::new();
    for _ in 0..5 {
        assert!(!auto.tick(0));
    }
    assert_eq!(auto.ticks(), 0);
}

#[test]
fn test_auto_fetch_schedule() {
    let mut auto = AutoFetch::new();
    let fired: Vec<bool> = (0..7).map(|_| auto.tick(3)).collect();
    assert_eq!(fired, vec![true, false, false, true, false, false, true]);
}

#[test]
fn test_auto_fetch_every_tick() {
    let mut auto = AutoFetch::new();
    assert!((0..4).all(|_| auto.tick(1)));
}

#[test]
fn test_auto_fetch_reenabled_fires_immediately() {
    let mut auto = AutoFetch::new();
    assert!(auto.tick(5));
    assert!(!auto.tick(5));
    assert!(!auto.tick(0));
    assert!(auto.tick(5));
}
