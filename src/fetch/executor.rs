//! The request executor.
//!
//! `Fetcher::fetch` is the single entry point: it assembles the final URL
//! and header set from a [`Request`], serializes the body, enforces the
//! per-call deadline and classifies the transport outcome into the closed
//! [`ApiResult`] envelope. Each call is independent; there is no shared
//! mutable state between concurrent calls.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

use super::error::{ApiResult, RequestError};
use super::request::{Request, ResponseEncoding};
use super::response::Body;
use super::transport::{
    ReqwestTransport, Transport, TransportOutcome, TransportRequest, TransportResponse,
};

/// Issues one network request per call and reports every outcome as an
/// [`ApiResult`]. Cheap to clone; holds only the injected transport.
#[derive(Clone)]
pub struct Fetcher {
    transport: Arc<dyn Transport>,
}

impl Fetcher {
    /// A fetcher backed by the production reqwest transport.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new()))
    }

    /// A fetcher backed by a caller-supplied transport. This is the seam
    /// tests use to control timing and response shape deterministically.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Execute one request, suspending the caller until completion, failure
    /// or timeout. Never panics past this boundary: defects in request
    /// construction are reported as [`RequestError::Unknown`].
    pub async fn fetch(&self, request: &Request) -> ApiResult<Body> {
        let headers = assemble_headers(request)?;
        let url = assemble_url(request);
        let body = match &request.body {
            Some(value) => Some(
                serde_json::to_string(value)
                    .map_err(|e| RequestError::unknown(e.to_string()))?,
            ),
            None => None,
        };

        tracing::debug!(method = %request.method, url = %url, "dispatching request");

        let send = self.transport.send(TransportRequest {
            method: request.method.clone(),
            url,
            headers,
            body,
            with_credentials: request.with_credentials,
        });

        // The deadline owns the in-flight future: when it elapses the future
        // is dropped, which aborts the underlying call, and the timer itself
        // is dropped on every other exit path.
        let outcome = match request.timeout {
            Some(timeout) if !timeout.is_zero() => {
                match tokio::time::timeout(timeout, send).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        tracing::debug!(url = %request.url, "request deadline elapsed");
                        return Err(RequestError::Timeout);
                    }
                }
            }
            _ => send.await,
        };

        match outcome {
            TransportOutcome::NetworkFailure(message) => Err(RequestError::unknown(message)),
            TransportOutcome::Completed(response) => classify(request.encoding, response),
        }
    }

    /// Execute a request and deserialize the JSON body into `T`.
    ///
    /// A response that is valid JSON but does not match `T` is reported as
    /// [`RequestError::Unknown`] carrying the deserialization message.
    pub async fn fetch_json<T: DeserializeOwned>(&self, request: &Request) -> ApiResult<T> {
        match self.fetch(request).await? {
            Body::Json(value) => serde_json::from_value(value)
                .map_err(|e| RequestError::unknown(format!("unexpected response shape: {e}"))),
            other => Err(RequestError::unknown(format!(
                "expected a JSON body, got {}",
                other.display()
            ))),
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the final header set. The declared content type is applied first
/// (and only when a body is present), then every non-`None` header entry is
/// overlaid in order, overwriting any key already set. That ordering lets
/// `headers` override `content_type` when both name the same key.
fn assemble_headers(request: &Request) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::new();

    if request.body.is_some() {
        if let Some(content_type) = &request.content_type {
            let value = HeaderValue::from_str(content_type).map_err(|e| {
                RequestError::unknown(format!("invalid content type '{content_type}': {e}"))
            })?;
            headers.insert(CONTENT_TYPE, value);
        }
    }

    for (name, value) in &request.headers {
        let Some(value) = value else { continue };
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RequestError::unknown(format!("invalid header name '{name}': {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| RequestError::unknown(format!("invalid header value '{value}': {e}")))?;
        headers.insert(header_name, header_value);
    }

    Ok(headers)
}

/// Append the percent-encoded query string only when there is one; an empty
/// parameter list leaves the URL untouched (no trailing `?`).
fn assemble_url(request: &Request) -> String {
    if request.query.is_empty() {
        return request.url.clone();
    }
    let query = request
        .query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", request.url, query)
}

/// Classify a completed round trip. Pure: the same response always yields
/// the same result.
///
/// The body is decoded first, even on failure paths, so error payloads from
/// the upstream API are surfaced to the caller inside `StatusCode` errors.
fn classify(encoding: ResponseEncoding, response: TransportResponse) -> ApiResult<Body> {
    let TransportResponse {
        status,
        content_type,
        body,
    } = response;
    let success = (200..300).contains(&status);

    if encoding == ResponseEncoding::Blob {
        let body = Body::Blob(body);
        return if success {
            Ok(body)
        } else {
            Err(RequestError::StatusCode { status, body })
        };
    }

    let declared_json = content_type
        .as_deref()
        .is_some_and(|ct| ct.contains("application/json"));
    let raw = String::from_utf8_lossy(&body).into_owned();
    let json = if declared_json {
        serde_json::from_str::<serde_json::Value>(&raw).ok()
    } else {
        None
    };

    if !success {
        let body = match json {
            Some(value) => Body::Json(value),
            None => Body::Text(raw),
        };
        return Err(RequestError::StatusCode { status, body });
    }

    match (encoding, json) {
        (_, Some(value)) => Ok(Body::Json(value)),
        (ResponseEncoding::Json, None) => Err(RequestError::NonJson {
            status,
            raw_body: raw,
        }),
        (_, None) => Ok(Body::Text(raw)),
    }
}
