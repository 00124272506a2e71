//! Chat request types and defaults.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// System prompt used when the caller supplies none (or an empty one).
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are ChatGPT, a large language model trained by \
     OpenAI. Follow the user's instructions carefully. Respond using markdown.";

/// Sampling temperature used when the caller supplies none.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// The model a chat request targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
}

impl ModelInfo {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// One chat-completion request as callers describe it.
///
/// `key` overrides the client's configured API key for this call only.
/// Absent `prompt` and `temperature` fall back to [`DEFAULT_SYSTEM_PROMPT`]
/// and [`DEFAULT_TEMPERATURE`].
#[derive(Debug, Clone, Deserialize)]
pub struct ChatBody {
    pub model: ModelInfo,
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub key: Option<SecretString>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl ChatBody {
    pub fn new(model: ModelInfo, messages: Vec<ChatMessage>) -> Self {
        Self {
            model,
            messages,
            key: None,
            prompt: None,
            temperature: None,
        }
    }
}
