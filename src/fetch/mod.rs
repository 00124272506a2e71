//! Single-call HTTP fetch with a closed error envelope.
//!
//! This module provides the crate's core abstraction: a declarative
//! [`Request`] value, an executor ([`Fetcher`]) that issues exactly one
//! network call per invocation, and a classification of every possible
//! outcome into [`ApiResult`]. Nothing is thrown past this boundary; every
//! transport-level inconsistency (non-JSON bodies, aborts, generic network
//! failures) is folded into one of the four [`RequestError`] kinds.
//!
//! The actual I/O is performed by an injectable [`Transport`], so tests can
//! substitute a deterministic fake that controls timing and response shape.

mod error;
mod executor;
mod request;
mod response;
mod transport;

pub use error::{ApiResult, RequestError, UNKNOWN_ERROR_MESSAGE};
pub use executor::Fetcher;
pub use request::{Request, ResponseEncoding};
pub use response::Body;
pub use transport::{
    ReqwestTransport, Transport, TransportOutcome, TransportRequest, TransportResponse,
};

pub use reqwest::Method;
