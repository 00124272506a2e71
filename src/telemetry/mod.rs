//! Trace and span ingestion client.
//!
//! A thin client for a Langfuse-style ingestion API: traces and spans keyed
//! by opaque string ids, created and updated one call at a time through the
//! fetch executor. No batching, no retries; a failed export surfaces as an
//! error and is the caller's to handle (typically by logging and moving on).

mod client;
mod types;

pub use client::{TelemetryClient, TelemetryConfig, TelemetryError};
pub use types::{ObservationLevel, SpanCreate, SpanUpdate, TraceCreate, TraceUpdate};
