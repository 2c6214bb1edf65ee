//! Chat client — unified interface for Ollama and OpenAI-compatible backends.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use kattown_core::config::LlmConfig;

use crate::error::LlmError;
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// Provider backend for chat completions.
#[derive(Debug, Clone)]
pub enum ChatProvider {
    /// Ollama running locally (recommended).
    Ollama {
        /// Root URL, e.g. `http://127.0.0.1:11434`.
        base_url: String,
    },
    /// OpenAI-compatible API (also works with Anthropic, Together, etc.).
    OpenAiCompatible {
        /// Root URL, e.g. `https://api.openai.com`.
        base_url: String,
        /// Bearer token.
        api_key: String,
    },
    /// No backend — all calls return `Unavailable`, callers show their
    /// canned apology instead.
    None,
}

/// The chat client that routes completions to the configured backend.
pub struct ChatClient {
    provider: ChatProvider,
    http: Client,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout_ms: u64,
    max_retries: u32,
}

impl ChatClient {
    /// Create a new chat client.
    #[must_use]
    pub fn new(provider: ChatProvider, model: impl Into<String>, max_retries: u32) -> Self {
        Self {
            provider,
            http: Client::new(),
            model: model.into(),
            max_tokens: 1024,
            temperature: 1.0,
            timeout_ms: 10_000,
            max_retries,
        }
    }

    /// Create a client with no backend (all calls fail → canned fallback).
    #[must_use]
    pub fn none() -> Self {
        Self {
            provider: ChatProvider::None,
            http: Client::new(),
            model: String::new(),
            max_tokens: 0,
            temperature: 0.0,
            timeout_ms: 0,
            max_retries: 0,
        }
    }

    /// Build a client from the game's `[llm]` config section.
    ///
    /// Unrecognised provider names are an error rather than a silent
    /// downgrade to `None`.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let provider = match config.provider.as_str() {
            "ollama" => ChatProvider::Ollama {
                base_url: config.base_url.clone(),
            },
            "openai" => ChatProvider::OpenAiCompatible {
                base_url: config.base_url.clone(),
                api_key: config.api_key.clone(),
            },
            "none" => ChatProvider::None,
            other => {
                return Err(LlmError::ConfigError(format!(
                    "unknown chat provider '{other}' (expected ollama, openai, or none)"
                )));
            }
        };
        Ok(Self {
            provider,
            http: Client::new(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_ms: config.timeout_ms,
            max_retries: config.max_retries,
        })
    }

    /// Check whether a backend is configured.
    #[must_use]
    pub fn is_available(&self) -> bool {
        !matches!(self.provider, ChatProvider::None)
    }

    /// Fetch a completion for the full ordered history.
    ///
    /// The first message should be the character's system persona, followed
    /// by the alternating player/character turns so far. Returns `Err` if
    /// the backend is unavailable, all retries fail, or the backend answers
    /// with empty text — callers substitute their fallback line on error.
    pub async fn complete(&self, history: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        let request = ChatRequest {
            messages: history.to_vec(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout_ms: self.timeout_ms,
        };
        match &self.provider {
            ChatProvider::None => {
                Err(LlmError::Unavailable("no chat provider configured".into()))
            }
            ChatProvider::Ollama { base_url } => self.complete_ollama(base_url, &request).await,
            ChatProvider::OpenAiCompatible { base_url, api_key } => {
                self.complete_openai(base_url, api_key, &request).await
            }
        }
    }

    /// Fetch a completion using Ollama's `/api/chat` endpoint.
    async fn complete_ollama(
        &self,
        base_url: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, LlmError> {
        let url = format!("{base_url}/api/chat");
        let body = json!({
            "model": &self.model,
            "messages": &request.messages,
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            }
        });

        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(
                    "Retrying chat call (attempt {}/{})",
                    attempt + 1,
                    self.max_retries + 1
                );
            }

            let start = Instant::now();
            let result = self
                .http
                .post(&url)
                .json(&body)
                .timeout(Duration::from_millis(request.timeout_ms))
                .send()
                .await;

            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) => {
                    if resp.status().is_success() {
                        let json: serde_json::Value = resp
                            .json()
                            .await
                            .map_err(|e| LlmError::ParseError(e.to_string()))?;

                        let text = json["message"]["content"].as_str().unwrap_or("").to_string();
                        if text.trim().is_empty() {
                            return Err(LlmError::EmptyResponse);
                        }

                        return Ok(ChatResponse {
                            text,
                            latency_ms,
                            model: self.model.clone(),
                        });
                    }
                    last_error = format!(
                        "HTTP {}: {}",
                        resp.status(),
                        resp.text().await.unwrap_or_default()
                    );
                    warn!("Ollama returned error: {}", last_error);
                }
                Err(e) => {
                    last_error = e.to_string();
                    if e.is_timeout() {
                        warn!("Ollama request timed out after {}ms", request.timeout_ms);
                    } else {
                        warn!("Ollama request failed: {}", last_error);
                    }
                }
            }
        }

        Err(LlmError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }

    /// Fetch a completion using an OpenAI-compatible `/v1/chat/completions`.
    async fn complete_openai(
        &self,
        base_url: &str,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, LlmError> {
        let url = format!("{base_url}/v1/chat/completions");
        let body = json!({
            "model": &self.model,
            "messages": &request.messages,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let mut last_error = String::new();
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                debug!(
                    "Retrying chat call (attempt {}/{})",
                    attempt + 1,
                    self.max_retries + 1
                );
            }

            let start = Instant::now();
            let result = self
                .http
                .post(&url)
                .header("Authorization", format!("Bearer {api_key}"))
                .json(&body)
                .timeout(Duration::from_millis(request.timeout_ms))
                .send()
                .await;

            let latency_ms = start.elapsed().as_millis() as u64;

            match result {
                Ok(resp) => {
                    if resp.status().is_success() {
                        let json: serde_json::Value = resp
                            .json()
                            .await
                            .map_err(|e| LlmError::ParseError(e.to_string()))?;

                        let text = json["choices"][0]["message"]["content"]
                            .as_str()
                            .unwrap_or("")
                            .to_string();
                        if text.trim().is_empty() {
                            return Err(LlmError::EmptyResponse);
                        }

                        return Ok(ChatResponse {
                            text,
                            latency_ms,
                            model: self.model.clone(),
                        });
                    }
                    last_error = format!("HTTP {}", resp.status());
                    warn!("OpenAI-compatible API returned error: {}", last_error);
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!("OpenAI-compatible API request failed: {}", last_error);
                }
            }
        }

        Err(LlmError::RetriesExhausted {
            attempts: self.max_retries + 1,
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_rejects_unknown_provider() {
        let config = LlmConfig {
            provider: "carrier-pigeon".into(),
            ..LlmConfig::default()
        };
        assert!(matches!(
            ChatClient::from_config(&config),
            Err(LlmError::ConfigError(_))
        ));
    }

    #[test]
    fn from_config_builds_default_ollama() {
        let client = ChatClient::from_config(&LlmConfig::default()).expect("valid config");
        assert!(client.is_available());
        assert!(matches!(client.provider, ChatProvider::Ollama { .. }));
    }

    #[tokio::test]
    async fn none_provider_is_unavailable() {
        let client = ChatClient::none();
        assert!(!client.is_available());
        let err = client
            .complete(&[ChatMessage::user("hello")])
            .await
            .expect_err("no backend");
        assert!(matches!(err, LlmError::Unavailable(_)));
    }
}
