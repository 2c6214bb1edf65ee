//! Error types for the core crate.

use thiserror::Error;

use crate::types::{NpcId, ZoneId};

/// Top-level error type for core operations.
///
/// Note the two failure families the error taxonomy deliberately keeps
/// *out* of this enum: collaborator failures are absorbed at the session
/// boundary as fallback content, and invariant-violating calls (double
/// open, double send) are inert no-ops. Neither ever surfaces as an error.
#[derive(Debug, Error)]
pub enum KattownError {
    /// Configuration file was malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A zone switch targeted an identifier no zone registered.
    #[error("Unknown zone: {0}")]
    UnknownZone(ZoneId),

    /// An operation referenced an NPC the active zone does not contain.
    #[error("Unknown NPC: {0}")]
    UnknownNpc(NpcId),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, KattownError>;
