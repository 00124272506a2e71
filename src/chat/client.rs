//! HTTP client for the chat-completion upstream.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::fetch::{Body, Fetcher, Request, RequestError};

use super::types::{ChatBody, ChatMessage, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE};

/// Where and how to reach the upstream API.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL, e.g. `https://api.openai.com`. No trailing slash.
    pub base_url: String,
    /// Ambient API key, used when the request body carries none.
    pub api_key: Option<SecretString>,
    /// Optional organization id sent as `OpenAI-Organization`.
    pub organization: Option<String>,
}

impl ChatConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            organization: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }
}

/// Ways a chat completion can fail.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No API key on the request body and none configured.
    #[error("no API key provided")]
    MissingApiKey,

    /// The upstream API rejected the request. Fields mirror the upstream
    /// error payload (`message`, `type`, `param`, `code`).
    #[error("upstream API error ({status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        error_type: Option<String>,
        param: Option<String>,
        code: Option<String>,
    },

    /// The call completed but the completion payload was not usable.
    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure from the fetch executor.
    #[error(transparent)]
    Fetch(#[from] RequestError),
}

/// Chat-completion client. One buffered request per call, driven through the
/// fetch executor.
#[derive(Clone)]
pub struct ChatClient {
    fetcher: Fetcher,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self::with_fetcher(config, Fetcher::new())
    }

    /// Use a caller-supplied fetcher (and thereby its transport).
    pub fn with_fetcher(config: ChatConfig, fetcher: Fetcher) -> Self {
        Self { fetcher, config }
    }

    /// Run one chat completion and return the assistant's message content.
    pub async fn complete(&self, body: &ChatBody) -> Result<String, ChatError> {
        let prompt = match body.prompt.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_SYSTEM_PROMPT,
        };
        let temperature = body.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        let key = body
            .key
            .as_ref()
            .or(self.config.api_key.as_ref())
            .ok_or(ChatError::MissingApiKey)?;

        let mut messages = vec![ChatMessage::system(prompt)];
        messages.extend(body.messages.iter().cloned());

        let payload = json!({
            "model": body.model.id,
            "messages": messages,
            "temperature": temperature,
            "stream": false,
        });

        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let request = Request::post(url)
            .with_json(payload)
            .with_content_type("application/json")
            .with_header(
                "Authorization",
                format!("Bearer {}", key.expose_secret()),
            )
            .with_optional_header("OpenAI-Organization", self.config.organization.clone());

        tracing::debug!(model = %body.model.id, "requesting chat completion");

        let completion: CompletionResponse = match self.fetcher.fetch_json(&request).await {
            Ok(completion) => completion,
            Err(RequestError::StatusCode { status, body }) => {
                return Err(upstream_error(status, body));
            }
            Err(e) => return Err(ChatError::Fetch(e)),
        };

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| ChatError::MalformedResponse("response contained no choices".into()))
    }
}

/// Map a failed-status body onto the upstream error shape when it matches,
/// falling back to the raw payload text.
fn upstream_error(status: u16, body: Body) -> ChatError {
    if let Some(value) = body.as_json() {
        if let Ok(wrapper) = serde_json::from_value::<ErrorResponse>(value.clone()) {
            let e = wrapper.error;
            return ChatError::Upstream {
                status,
                message: e.message,
                error_type: e.error_type,
                param: e.param,
                code: e.code,
            };
        }
    }
    ChatError::Upstream {
        status,
        message: body.display(),
        error_type: None,
        param: None,
        code: None,
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: UpstreamErrorPayload,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorPayload {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
    param: Option<String>,
    code: Option<String>,
}
