//! Core types for chat-completion requests and responses.

use serde::{Deserialize, Serialize};

/// Role of a message in a chat transcript, in backend wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Persona and ground rules. Always first in a request.
    System,
    /// What the player typed.
    User,
    /// A previous reply from the character.
    Assistant,
}

/// One entry in the ordered history sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it.
    pub role: ChatRole,
    /// What was said.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Build an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Full ordered history: system persona first, then alternating turns.
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic, higher = more creative).
    pub temperature: f32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl ChatRequest {
    /// Build a request from a history with sensible reply-length defaults.
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            max_tokens: 1024,
            temperature: 1.0,
            timeout_ms: 10_000,
        }
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// A chat completion returned by a backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// The generated reply text. Never empty — an empty completion is an
    /// error at the client layer.
    pub text: String,
    /// Round-trip latency in milliseconds.
    pub latency_ms: u64,
    /// Which model produced it.
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::system("rules")).expect("serialize");
        assert_eq!(json, r#"{"role":"system","content":"rules"}"#);
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).expect("serialize");
        assert!(json.contains(r#""role":"assistant""#));
    }

    #[test]
    fn roles_deserialize_lowercase() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role":"user","content":"hello"}"#).expect("deserialize");
        assert_eq!(msg.role, ChatRole::User);
        assert_eq!(msg.content, "hello");
    }
}
