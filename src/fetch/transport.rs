//! HTTP transport abstraction.
//!
//! The executor never talks to the network directly; it hands a fully
//! assembled [`TransportRequest`] to an injected [`Transport`] and receives a
//! discriminated [`TransportOutcome`] back. Classification logic therefore
//! operates on structured data, never on stringly-typed error inspection,
//! and tests can substitute a deterministic fake.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap};

/// Transport-level request data: everything already assembled, nothing left
/// to interpret.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    /// Final URL, query string included.
    pub url: String,
    /// Final header set, content type and overlays already applied.
    pub headers: HeaderMap,
    /// Serialized JSON body text, when present.
    pub body: Option<String>,
    /// Whether ambient credentials (cookies) should be attached.
    pub with_credentials: bool,
}

/// Transport-level response data, body fully buffered.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// The declared `Content-Type`, if any.
    pub content_type: Option<String>,
    pub body: Bytes,
}

/// The closed set of outcomes a transport can produce. Cancellation is not
/// represented here: the executor owns the deadline and drops the in-flight
/// future when it fires.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportOutcome {
    /// The round trip completed; status may still indicate failure.
    Completed(TransportResponse),
    /// The call never produced a response (DNS, connection refused, broken
    /// body read, malformed request, ...).
    NetworkFailure(String),
}

/// The underlying network call facility.
///
/// `send` must be cancel-safe: dropping the returned future aborts the
/// in-flight request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> TransportOutcome;
}

/// Production transport backed by `reqwest`.
///
/// Two clients are held so the ambient-credential mode maps onto a cookie
/// jar: `with_credentials` requests share one, all others go through a
/// jar-less client.
pub struct ReqwestTransport {
    plain: reqwest::Client,
    with_cookies: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let with_cookies = match reqwest::Client::builder().cookie_store(true).build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("failed to build cookie-enabled client, falling back: {e}");
                reqwest::Client::new()
            }
        };
        Self {
            plain: reqwest::Client::new(),
            with_cookies,
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> TransportOutcome {
        let client = if request.with_credentials {
            &self.with_cookies
        } else {
            &self.plain
        };

        let mut rb = client
            .request(request.method, &request.url)
            .headers(request.headers);
        if let Some(body) = request.body {
            rb = rb.body(body);
        }

        let resp = match rb.send().await {
            Ok(resp) => resp,
            Err(e) => return TransportOutcome::NetworkFailure(e.to_string()),
        };

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        match resp.bytes().await {
            Ok(body) => TransportOutcome::Completed(TransportResponse {
                status,
                content_type,
                body,
            }),
            Err(e) => TransportOutcome::NetworkFailure(e.to_string()),
        }
    }
}
