pub mod openai;
pub mod prompt_builder;
pub mod prompts;
mod stream;

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Everything needed for one chat-completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub max_tokens: usize,
    pub temperature: f32,
    pub stream: bool,
    pub timeout: Duration,
}

/// Trait for talking to a chat-completion backend.
pub trait ChatClient: Send + Sync {
    /// Send `request` and return the full response text.
    ///
    /// When streaming, `on_progress` receives the text accumulated so far after
    /// each chunk.
    fn complete(
        &self,
        request: &CompletionRequest<'_>,
        on_progress: &mut dyn FnMut(&str),
    ) -> Result<String>;
}
