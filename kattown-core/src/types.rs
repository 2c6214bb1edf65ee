//! Core type definitions shared across the scene/session state machines.

use std::fmt;

use rand::Rng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Stable identity key for an NPC, derived from its display name.
///
/// The slug is lowercase with whitespace runs collapsed to `-`, so
/// `"Angry Student"` becomes `angry-student`. Unique across all NPCs
/// in a zone; used as the chat registry's session key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpcId(String);

impl NpcId {
    /// Derive an ID from a human-readable name or description.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let slug = name
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join("-");
        Self(slug)
    }

    /// The slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a discrete playable zone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(String);

impl ZoneId {
    /// Create a zone ID from a key string.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Conversation roles
// ---------------------------------------------------------------------------

/// Who authored a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The player's avatar.
    Player,
    /// The NPC being spoken to.
    Character,
    /// Persona seed text; always precedes all Player/Character messages.
    System,
}

// ---------------------------------------------------------------------------
// Spatial primitives
// ---------------------------------------------------------------------------

/// A 2D position in zone coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Position {
    /// Construct a position.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Four-way movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Negative Y.
    Up,
    /// Positive Y.
    Down,
    /// Negative X.
    Left,
    /// Positive X.
    Right,
}

impl Direction {
    /// Unit offset along this direction's axis.
    #[must_use]
    pub fn offset(self) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }

    /// Pick a direction uniformly at random from the 4-way set.
    #[must_use]
    pub fn roll(rng: &mut dyn RngCore) -> Self {
        match rng.gen_range(0..4u8) {
            0 => Self::Up,
            1 => Self::Down,
            2 => Self::Left,
            _ => Self::Right,
        }
    }
}

/// Animation playback label for the delegated engine.
///
/// The core only tracks the label; the engine owns all playback timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// Directional input is resolving into movement.
    Walking,
    /// Standing still.
    #[default]
    Idle,
}
