//! Chat-completion error types.

use thiserror::Error;

/// Errors that can occur while fetching a chat completion.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("chat request failed: {0}")]
    RequestFailed(String),

    /// Response body was not the shape the backend documents.
    #[error("failed to parse chat response: {0}")]
    ParseError(String),

    /// Request timed out.
    #[error("chat request timed out after {0}ms")]
    Timeout(u64),

    /// Provider is unavailable (no backend configured, or connect refused).
    #[error("chat provider unavailable: {0}")]
    Unavailable(String),

    /// Backend answered but produced no text. Callers substitute their
    /// own fallback line rather than showing an empty bubble.
    #[error("chat backend returned an empty completion")]
    EmptyResponse,

    /// All retry attempts exhausted.
    #[error("all chat retry attempts exhausted after {attempts} tries: {last_error}")]
    RetriesExhausted {
        /// How many attempts were made (initial try included).
        attempts: u32,
        /// The error message from the final attempt.
        last_error: String,
    },

    /// Configuration error.
    #[error("chat configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(0)
        } else if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}
