//! Decoded response bodies.

use bytes::Bytes;
use serde_json::Value;

/// A fully-buffered response body, decoded according to the request's
/// [`ResponseEncoding`](super::ResponseEncoding) and the content type the
/// server declared.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Blob(Bytes),
    Text(String),
}

impl Body {
    /// The JSON value, if this body was decoded as JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The raw text, if this body was decoded as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    /// A human-readable rendering of the body, for error messages and logs.
    pub fn display(&self) -> String {
        match self {
            Body::Json(value) => value.to_string(),
            Body::Text(text) => text.clone(),
            Body::Blob(bytes) => format!("<{} bytes>", bytes.len()),
        }
    }
}
