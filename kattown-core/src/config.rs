//! Configuration for the game core, loadable from `kattown.toml`.
//!
//! Every knob defaults to the tuning the game shipped with, so an empty
//! TOML document is a valid configuration.

use serde::{Deserialize, Serialize};

/// Top-level game configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    /// Player movement settings.
    #[serde(default)]
    pub movement: MovementConfig,
    /// NPC wander and interaction settings.
    #[serde(default)]
    pub npc: NpcConfig,
    /// Zone-transition trigger settings.
    #[serde(default)]
    pub transition: TransitionConfig,
    /// Conversation settings.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Response-collaborator settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl GameConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `KattownError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::KattownError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Player avatar movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    /// Movement speed in units per second.
    #[serde(default = "default_speed")]
    pub speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
        }
    }
}

/// NPC wander behavior and interaction gating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcConfig {
    /// Ticks between wander direction re-rolls.
    #[serde(default = "default_wander_cooldown")]
    pub wander_cooldown: u32,
    /// Euclidean distance gating both hover affordance and click-to-open.
    #[serde(default = "default_interaction_range")]
    pub interaction_range: f32,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            wander_cooldown: default_wander_cooldown(),
            interaction_range: default_interaction_range(),
        }
    }
}

/// Enterable-structure trigger tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionConfig {
    /// Consecutive hold-forward ticks required to enter a structure.
    #[serde(default = "default_hold_frames")]
    pub hold_frames: u32,
    /// Vertical band below a structure's midline that counts as in range.
    #[serde(default = "default_vertical_band")]
    pub vertical_band: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            hold_frames: default_hold_frames(),
            vertical_band: default_vertical_band(),
        }
    }
}

/// Conversation-session tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Character-turn text substituted when the collaborator fails.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fallback_reply: default_fallback_reply(),
        }
    }
}

/// Response-collaborator (chat completion) settings.
///
/// Consumed by the LLM client crate; kept here so one TOML file
/// configures the whole game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Backend: "ollama", "openai", or "none".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the backend.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key for OpenAI-compatible backends.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retries after a failed request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            api_key: String::new(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_speed() -> f32 {
    160.0
}

fn default_wander_cooldown() -> u32 {
    50
}

fn default_interaction_range() -> f32 {
    230.0
}

fn default_hold_frames() -> u32 {
    50
}

fn default_vertical_band() -> f32 {
    20.0
}

fn default_fallback_reply() -> String {
    "I'm sorry, I couldn't fetch a response at this moment.".to_string()
}

fn default_provider() -> String {
    "ollama".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    1.0
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    1
}
