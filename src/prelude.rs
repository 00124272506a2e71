//! Convenience re-exports.

pub use crate::fetch::{
    ApiResult, Body, Fetcher, Method, Request, RequestError, ResponseEncoding, Transport,
    TransportOutcome, TransportRequest, TransportResponse,
};

pub use crate::chat::{ChatBody, ChatClient, ChatConfig, ChatError, ChatMessage, ModelInfo, Role};

pub use crate::telemetry::{
    SpanCreate, SpanUpdate, TelemetryClient, TelemetryConfig, TelemetryError, TraceCreate,
    TraceUpdate,
};
