//! End-to-end tests of the fetch executor against a real HTTP server.
//!
//! Uses wiremock to exercise the production reqwest transport; the
//! deterministic classification tests live next to the executor itself.

use std::time::Duration;

use edgefetch::fetch::{Body, Fetcher, Request, RequestError, ResponseEncoding};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ok_json_response_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/things"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"x": 1})))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    let body = fetcher
        .fetch(&Request::get(format!("{}/things", server.uri())))
        .await
        .unwrap();

    assert_eq!(body, Body::Json(json!({"x": 1})));
}

#[tokio::test]
async fn failed_status_surfaces_the_error_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    let result = fetcher
        .fetch(&Request::get(format!("{}/missing", server.uri())))
        .await;

    assert_eq!(
        result,
        Err(RequestError::StatusCode {
            status: 404,
            body: Body::Json(json!({"message": "not found"})),
        })
    );
}

#[tokio::test]
async fn html_response_fails_when_json_was_expected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>...</html>")
                .insert_header("Content-Type", "text/html"),
        )
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    let result = fetcher
        .fetch(&Request::get(format!("{}/page", server.uri())))
        .await;

    assert_eq!(
        result,
        Err(RequestError::NonJson {
            status: 200,
            raw_body: "<html>...</html>".to_string(),
        })
    );
}

#[tokio::test]
async fn text_encoding_accepts_the_same_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("plain")
                .insert_header("Content-Type", "text/plain"),
        )
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    let body = fetcher
        .fetch(
            &Request::get(format!("{}/page", server.uri()))
                .with_encoding(ResponseEncoding::Text),
        )
        .await
        .unwrap();

    assert_eq!(body, Body::Text("plain".to_string()));
}

#[tokio::test]
async fn blob_encoding_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0u8, 1, 2, 3])
                .insert_header("Content-Type", "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    let body = fetcher
        .fetch(
            &Request::get(format!("{}/bin", server.uri())).with_encoding(ResponseEncoding::Blob),
        )
        .await
        .unwrap();

    assert_eq!(body, Body::Blob(bytes::Bytes::from(vec![0u8, 1, 2, 3])));
}

#[tokio::test]
async fn slow_server_hits_the_deadline() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    let result = fetcher
        .fetch(
            &Request::get(format!("{}/slow", server.uri()))
                .with_timeout(Duration::from_millis(50)),
        )
        .await;

    assert_eq!(result, Err(RequestError::Timeout));
}

#[tokio::test]
async fn unreachable_host_is_an_unknown_failure() {
    let fetcher = Fetcher::new();
    // Port 1 is never listening locally.
    let result = fetcher.fetch(&Request::get("http://127.0.0.1:1/")).await;

    match result {
        Err(RequestError::Unknown { message }) => assert!(!message.is_empty()),
        other => panic!("expected Unknown, got {other:?}"),
    }
}

#[tokio::test]
async fn query_parameters_and_headers_reach_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "a b"))
        .and(query_param("page", "2"))
        .and(header("x-api-key", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": []})))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    let body = fetcher
        .fetch(
            &Request::get(format!("{}/search", server.uri()))
                .with_query("q", "a b")
                .with_query("page", "2")
                .with_header("x-api-key", "secret"),
        )
        .await
        .unwrap();

    assert_eq!(body, Body::Json(json!({"hits": []})));
}

#[tokio::test]
async fn credentialed_requests_share_an_ambient_cookie_jar() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .insert_header("Set-Cookie", "session=abc"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": "u"})))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    fetcher
        .fetch(&Request::get(format!("{}/login", server.uri())).with_credentials(true))
        .await
        .unwrap();
    let body = fetcher
        .fetch(&Request::get(format!("{}/me", server.uri())).with_credentials(true))
        .await
        .unwrap();

    assert_eq!(body, Body::Json(json!({"user": "u"})));
}

#[tokio::test]
async fn posted_bodies_are_json_with_the_declared_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ingest"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new();
    fetcher
        .fetch(
            &Request::post(format!("{}/ingest", server.uri()))
                .with_json(json!({"a": 1}))
                .with_content_type("application/json"),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        serde_json::from_slice::<serde_json::Value>(&requests[0].body).unwrap(),
        json!({"a": 1})
    );
}
