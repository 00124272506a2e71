//! The ingestion client itself.

use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::fetch::{Fetcher, Method, Request, RequestError, ResponseEncoding};

use super::types::{SpanCreate, SpanUpdate, TraceCreate, TraceUpdate};

/// Endpoint and credentials for the ingestion API.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Base endpoint, e.g. `https://cloud.langfuse.com`. No trailing slash.
    pub endpoint: String,
    pub public_key: String,
    pub secret_key: SecretString,
}

impl TelemetryConfig {
    pub fn new(
        endpoint: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            public_key: public_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Non-2xx from the ingestion API.
    #[error("telemetry API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure from the fetch executor.
    #[error(transparent)]
    Fetch(#[from] RequestError),
}

/// Client for a Langfuse-style trace/span ingestion API. Every operation is
/// one executor call; ids are opaque strings, generated when not supplied.
#[derive(Clone)]
pub struct TelemetryClient {
    fetcher: Fetcher,
    config: TelemetryConfig,
}

impl TelemetryClient {
    pub fn new(config: TelemetryConfig) -> Self {
        Self::with_fetcher(config, Fetcher::new())
    }

    pub fn with_fetcher(config: TelemetryConfig, fetcher: Fetcher) -> Self {
        Self { fetcher, config }
    }

    /// Create a trace, returning its id.
    pub async fn create_trace(&self, mut trace: TraceCreate) -> Result<String, TelemetryError> {
        let id = trace
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        self.send(Method::POST, "traces", &trace).await?;
        Ok(id)
    }

    pub async fn update_trace(&self, update: TraceUpdate) -> Result<(), TelemetryError> {
        self.send(Method::PATCH, "traces", &update).await
    }

    /// Create a span within a trace, returning the span id.
    pub async fn create_span(&self, mut span: SpanCreate) -> Result<String, TelemetryError> {
        let id = span
            .id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        self.send(Method::POST, "spans", &span).await?;
        Ok(id)
    }

    pub async fn update_span(&self, update: SpanUpdate) -> Result<(), TelemetryError> {
        self.send(Method::PATCH, "spans", &update).await
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        resource: &str,
        payload: &T,
    ) -> Result<(), TelemetryError> {
        let url = format!("{}/api/public/{}", self.config.endpoint, resource);
        let body = serde_json::to_value(payload)
            .map_err(|e| TelemetryError::Fetch(RequestError::Unknown {
                message: e.to_string(),
            }))?;

        // The response body is discarded on success, so accept any encoding
        // the server chooses rather than insisting on JSON.
        let request = Request::new(method, url)
            .with_json(body)
            .with_content_type("application/json")
            .with_header("Authorization", self.basic_auth())
            .with_encoding(ResponseEncoding::Text);

        match self.fetcher.fetch(&request).await {
            Ok(_) => Ok(()),
            Err(RequestError::StatusCode { status, body }) => {
                tracing::warn!(status, resource, "telemetry export rejected");
                Err(TelemetryError::Api {
                    status,
                    message: body.display(),
                })
            }
            Err(e) => Err(TelemetryError::Fetch(e)),
        }
    }

    fn basic_auth(&self) -> String {
        let credentials = format!(
            "{}:{}",
            self.config.public_key,
            self.config.secret_key.expose_secret()
        );
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_encodes_public_and_secret_key() {
        let client = TelemetryClient::new(TelemetryConfig::new(
            "https://cloud.langfuse.com",
            "pk-test",
            "sk-test",
        ));

        // base64("pk-test:sk-test")
        assert_eq!(client.basic_auth(), "Basic cGstdGVzdDpzay10ZXN0");
    }
}
