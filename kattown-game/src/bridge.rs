//! Bridge module — maps between the core conversation model and the
//! chat-completion wire model.
//!
//! The core speaks in [`ConversationMessage`]s with game roles
//! (`System`/`Player`/`Character`); the backend speaks OpenAI-style chat
//! roles (`system`/`user`/`assistant`). This module provides the mapping
//! and the [`LlmReplyProvider`] adapter so the core never sees HTTP.

use async_trait::async_trait;

use kattown_core::session::{ConversationMessage, ReplyError, ReplyProvider};
use kattown_core::types::Role;
use kattown_llm::{ChatClient, ChatMessage, ChatRole, LlmError};

/// Translate one transcript line into a wire message.
#[must_use]
pub fn to_chat_message(message: &ConversationMessage) -> ChatMessage {
    let role = match message.role {
        Role::System => ChatRole::System,
        Role::Player => ChatRole::User,
        Role::Character => ChatRole::Assistant,
    };
    ChatMessage {
        role,
        content: message.text.clone(),
    }
}

/// [`ReplyProvider`] backed by a [`ChatClient`].
///
/// Every error variant maps onto the core's collaborator-failure model;
/// the core substitutes its fallback apology, so nothing here panics or
/// retries beyond what the client already does.
pub struct LlmReplyProvider {
    client: ChatClient,
}

impl LlmReplyProvider {
    /// Wrap a configured chat client.
    #[must_use]
    pub fn new(client: ChatClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReplyProvider for LlmReplyProvider {
    async fn reply(&self, history: &[ConversationMessage]) -> Result<String, ReplyError> {
        let wire: Vec<ChatMessage> = history.iter().map(to_chat_message).collect();
        match self.client.complete(&wire).await {
            Ok(response) => Ok(response.text),
            Err(LlmError::Unavailable(reason)) => Err(ReplyError::Unavailable(reason)),
            Err(LlmError::Timeout(ms)) => Err(ReplyError::Timeout(ms)),
            Err(other) => Err(ReplyError::Failed(other.to_string())),
        }
    }
}
