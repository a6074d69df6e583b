//! Wire types for the OpenAI-compatible chat-completion endpoint.
//!
//! # Request
//!
//! ```json
//! { "model": "...", "messages": [{ "role": "user", "content": "..." }],
//!   "temperature": 0.7, "max_tokens": 800 }
//! ```
//!
//! # Response
//!
//! A successful call carries the text at `choices[0].message.content`.
//! Providers report failures as `{ "error": { "message": "...", "type": "..." } }`,
//! sometimes with a 200 status. Anything else is treated as malformed.

use serde::{Deserialize, Serialize};

// ── Request ──────────────────────────────────────────────────────────────────

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

// ── Response ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// What a response body turned out to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// The first choice's message body, untrimmed.
    Success(String),
    /// A well-formed provider error object.
    ProviderError {
        message: String,
        kind: Option<String>,
    },
    /// Neither shape matched. Carries the raw body.
    Malformed(String),
}

/// Classify a response body.
pub fn decode_response(body: &str) -> ChatOutcome {
    if let Ok(response) = serde_json::from_str::<ChatResponse>(body)
        && let Some(content) = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
    {
        return ChatOutcome::Success(content);
    }

    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return ChatOutcome::ProviderError {
            message: envelope.error.message,
            kind: envelope.error.kind,
        };
    }

    ChatOutcome::Malformed(body.to_string())
}
