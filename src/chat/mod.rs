//! Chat-completion client.
//!
//! Drives an OpenAI-style `/v1/chat/completions` endpoint through the fetch
//! executor: one buffered request per call, defaults applied for the system
//! prompt and temperature, upstream error payloads parsed into a typed
//! error. Streaming decode is deliberately out of scope; bodies are treated
//! as a single buffered payload.

mod client;
mod types;

pub use client::{ChatClient, ChatConfig, ChatError};
pub use types::{
    ChatBody, ChatMessage, ModelInfo, Role, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE,
};
