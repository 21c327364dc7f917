//! HTTP fetcher integration tests against a local mock server.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use collage_editor::{BackgroundFetcher, FetchError, HttpFetcher};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 1x1 red PNG.
const TEST_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

fn png_bytes() -> Vec<u8> {
    STANDARD.decode(TEST_PNG_BASE64).unwrap()
}

fn endpoint(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{route}", server.uri())).unwrap()
}

#[tokio::test]
async fn test_fetch_returns_body_bytes() {
    let server = MockServer::start().await;
    let body = png_bytes();
    Mock::given(method("GET"))
        .and(path("/bg.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let bytes = fetcher.fetch(&endpoint(&server, "/bg.png")).await.unwrap();
    assert_eq!(bytes, body);
}

#[tokio::test]
async fn test_fetch_sends_identifying_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bg.png"))
        .and(header("user-agent", "collage-editor (emoji-collage)"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    fetcher.fetch(&endpoint(&server, "/bg.png")).await.unwrap();
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let err = fetcher
        .fetch(&endpoint(&server, "/missing.png"))
        .await
        .unwrap_err();
    assert!(!err.is_timeout());
    match &err {
        FetchError::Status(status) => assert_eq!(status.as_u16(), 404),
        FetchError::Http(other) => panic!("expected status error, got {other}"),
    }
}

#[tokio::test]
async fn test_expired_deadline_reports_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"x".to_vec())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_deadline(Duration::from_millis(50)).unwrap();
    let err = fetcher
        .fetch(&endpoint(&server, "/slow.png"))
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "expected a timeout, got {err}");
}
