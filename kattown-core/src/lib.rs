//! # Kat Town Core
//!
//! Game-agnostic state machines for a small real-time interactive world:
//! a player avatar roams discrete zones, walks up to wandering NPCs, and
//! opens turn-based text conversations backed by an external
//! chat-completion collaborator.
//!
//! The crate owns the three state machines with real invariants:
//!
//! - **Chat sessions** — per-NPC persistent logs with an at-most-one
//!   open dialog rule and an at-most-one in-flight reply rule
//!   ([`registry::ChatSessionRegistry`], [`session::ConversationSession`]).
//! - **Zone transitions** — proximity-gated hold-to-enter triggers and
//!   boundary exits, composed behind a [`zone::Zone`] capability trait.
//! - **NPC wander** — timer-driven 4-way wander, frozen while chatting
//!   ([`npc::NpcActor`]).
//!
//! Rendering, physics resolution, audio, and dialog widgets are external
//! collaborators: the core emits [`effects::EngineCommand`]s and owns
//! opaque [`registry::DialogSurface`] handles, nothing more.
//!
//! ## Scheduling model
//!
//! Single-threaded cooperative: one synchronous tick drives every state
//! machine. The only asynchrony is the collaborator round-trip, run on a
//! spawned task and delivered back at the next tick boundary by
//! [`session::TurnDispatcher`] — the frame loop never blocks, and a late
//! reply still lands in its (possibly hidden) session.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod input;
pub mod npc;
pub mod registry;
pub mod session;
pub mod spatial;
pub mod types;
pub mod zone;

pub use config::GameConfig;
pub use controller::GameSessionController;
pub use error::{KattownError, Result};
pub use registry::ChatSessionRegistry;
pub use session::{ConversationSession, ReplyProvider, TurnDispatcher};
pub use types::*;
