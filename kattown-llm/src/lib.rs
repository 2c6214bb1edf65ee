//! # kattown-llm — Chat-Completion Layer for Kat Town
//!
//! Provides a unified interface for NPC chat completions across backends:
//!   - **Ollama** (local, recommended default)
//!   - **OpenAI-compatible API** (also works with Anthropic, Together, etc.)
//!
//! All character replies in Kat Town go through this crate, ensuring:
//!   - Full-history chat requests (system persona first, then turns)
//!   - Timeout management
//!   - Retry on transient failure
//!   - Graceful degradation — callers substitute a canned apology on error

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]

pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{ChatClient, ChatProvider};
pub use error::LlmError;
pub use types::{ChatMessage, ChatRequest, ChatResponse, ChatRole};
