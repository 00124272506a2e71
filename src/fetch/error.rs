//! The closed failure taxonomy of the fetch executor.

use thiserror::Error;

use super::response::Body;

/// Fallback message when the transport reports a failure without any usable
/// message of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// The envelope wrapping every outcome of a request: either a decoded body
/// or exactly one of the four [`RequestError`] kinds.
pub type ApiResult<T> = Result<T, RequestError>;

/// Every way a single fetch can fail. No other error type crosses the
/// executor boundary, and nothing is panicked past it.
///
/// Callers that surface these to end users are expected to collapse all
/// kinds to a generic failure response; no per-kind HTTP status mapping is
/// prescribed here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    /// The transport completed but the HTTP status indicates failure
    /// (non-2xx). `body` carries whatever the decoding step produced, which
    /// may be a raw-text fallback if the payload could not be parsed.
    #[error("HTTP error, status: {status}")]
    StatusCode { status: u16, body: Body },

    /// A JSON body was expected but the response could not be decoded as
    /// such. Carries the status and the raw text body.
    #[error("expected a JSON response, got status {status} with a non-JSON body")]
    NonJson { status: u16, raw_body: String },

    /// The configured deadline elapsed before completion; the in-flight
    /// request was cancelled.
    #[error("request timed out")]
    Timeout,

    /// Any other transport-level failure: DNS, connection refused, malformed
    /// request construction, and so on.
    #[error("{message}")]
    Unknown { message: String },
}

impl RequestError {
    /// Build an `Unknown` error, substituting the fixed generic message when
    /// the transport yielded nothing usable.
    pub(crate) fn unknown(message: String) -> Self {
        if message.is_empty() {
            RequestError::Unknown {
                message: UNKNOWN_ERROR_MESSAGE.to_string(),
            }
        } else {
            RequestError::Unknown { message }
        }
    }
}
