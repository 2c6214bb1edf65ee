//! # kattown-game — Kat Town assembled
//!
//! Composition of the core state machines into the actual town: three
//! zones (the village and its two enterable buildings), the NPC cast,
//! the chat bridge to a completion backend, and the [`Game`] root the
//! embedding engine drives once per frame.
//!
//! The engine integration contract is narrow on purpose: feed input
//! events into [`Game::input`], call [`Game::tick`] each frame, drain
//! [`kattown_core::effects::EngineCommand`]s out, and forward dialog UI
//! events to [`Game::submit_chat`] / [`Game::close_chat`].

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod bridge;
pub mod game;
pub mod surface;
pub mod zones;

pub use bridge::LlmReplyProvider;
pub use game::Game;
pub use surface::{TranscriptSurface, TranscriptSurfaceFactory};
