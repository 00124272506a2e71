//! Declarative request descriptions.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;

/// The caller's declared expectation for how to interpret the response body.
///
/// `Json` is the default. When the server declares a non-JSON content type
/// while `Json` was in effect, the raw text body is surfaced inside the
/// resulting [`RequestError::NonJson`](super::RequestError::NonJson).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseEncoding {
    /// Parse the body as JSON.
    #[default]
    Json,
    /// Read the entire body as opaque bytes, regardless of content type.
    Blob,
    /// Read the body as raw text.
    Text,
}

/// Immutable description of one HTTP request.
///
/// A `Request` carries everything the [`Fetcher`](super::Fetcher) needs to
/// issue a single call: URL, method, headers, query parameters, an optional
/// JSON body, a per-call timeout and the expected response encoding. It has
/// no lifetime beyond the call that consumes it.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    /// Insertion-ordered header entries. Entries with a `None` value are
    /// dropped at assembly time, not sent as empty.
    pub headers: Vec<(String, Option<String>)>,
    /// Ordered query parameters, serialized into the URL only if non-empty.
    pub query: Vec<(String, String)>,
    /// Serialized to JSON text before transmission when present.
    pub body: Option<Value>,
    /// Becomes the `Content-Type` header when `body` is present. A same-named
    /// entry in `headers` still overrides it.
    pub content_type: Option<String>,
    /// When present and non-zero, the in-flight call is aborted after this
    /// duration if no response has completed.
    pub timeout: Option<Duration>,
    /// Whether ambient credentials (cookies) are attached.
    pub with_credentials: bool,
    pub encoding: ResponseEncoding,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            content_type: None,
            timeout: None,
            with_credentials: false,
            encoding: ResponseEncoding::default(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Add a header entry.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), Some(value.into())));
        self
    }

    /// Add a header entry whose value may be absent. `None` entries are
    /// dropped at assembly time.
    pub fn with_optional_header(
        mut self,
        name: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        self.headers.push((name.into(), value));
        self
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the JSON request body.
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }

    pub fn with_encoding(mut self, encoding: ResponseEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}
