//! Per-NPC conversation sessions and the asynchronous turn protocol.
//!
//! A [`ConversationSession`] is the persistent message log between the
//! player and one NPC. The session itself is synchronous state; the only
//! asynchrony in the whole game is the collaborator round-trip, which the
//! [`TurnDispatcher`] runs on a spawned task and delivers back as a
//! [`TurnOutcome`] drained at the next tick boundary. The frame loop never
//! blocks on a reply.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::types::{NpcId, Role};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// One line of conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    /// Who authored the line.
    pub role: Role,
    /// The line itself.
    pub text: String,
    /// Position in the session log. Strictly increasing, gapless from 0,
    /// assigned at append time — never at request time.
    pub sequence: u64,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The ongoing conversation state between the player and one NPC.
///
/// Created lazily on first chat open, seeded with the NPC's persona as a
/// System message, and kept for the whole process lifetime — leaving a
/// zone and coming back resumes the same log.
#[derive(Debug)]
pub struct ConversationSession {
    owner: NpcId,
    persona: String,
    history: Vec<ConversationMessage>,
    turn_in_flight: bool,
}

impl ConversationSession {
    /// Create a session seeded with the persona System message.
    #[must_use]
    pub fn new(owner: NpcId, persona: impl Into<String>) -> Self {
        let persona = persona.into();
        let mut session = Self {
            owner,
            persona: persona.clone(),
            history: Vec::new(),
            turn_in_flight: false,
        };
        session.push(Role::System, persona);
        session
    }

    /// The NPC this session belongs to.
    #[must_use]
    pub fn owner(&self) -> &NpcId {
        &self.owner
    }

    /// The persona seed text.
    #[must_use]
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// The full ordered message log.
    #[must_use]
    pub fn history(&self) -> &[ConversationMessage] {
        &self.history
    }

    /// Whether a reply request is outstanding.
    #[must_use]
    pub fn turn_in_flight(&self) -> bool {
        self.turn_in_flight
    }

    /// Append a message to the log.
    ///
    /// An empty (or whitespace-only) Player line is a silent no-op and
    /// returns `None` — typing nothing and pressing send does nothing.
    pub fn append(&mut self, role: Role, text: impl Into<String>) -> Option<&ConversationMessage> {
        let text = text.into();
        if role == Role::Player && text.trim().is_empty() {
            return None;
        }
        self.push(role, text);
        self.history.last()
    }

    /// Mark a turn as in flight.
    ///
    /// Returns false (and changes nothing) when a turn is already
    /// outstanding: at most one reply request per session, and a
    /// double-send from the UI must be inert rather than an error.
    pub fn begin_turn(&mut self) -> bool {
        if self.turn_in_flight {
            debug!(npc = %self.owner, "reply already in flight; send ignored");
            return false;
        }
        self.turn_in_flight = true;
        true
    }

    /// Append the Character reply and clear the in-flight flag.
    pub fn complete_turn(&mut self, text: impl Into<String>) {
        self.push(Role::Character, text.into());
        self.turn_in_flight = false;
    }

    fn push(&mut self, role: Role, text: String) {
        let sequence = self.history.len() as u64;
        self.history.push(ConversationMessage {
            role,
            text,
            sequence,
        });
    }
}

// ---------------------------------------------------------------------------
// Reply provider seam
// ---------------------------------------------------------------------------

/// Failure of the response collaborator.
///
/// Never escapes the session boundary: every variant is converted into
/// the configured fallback Character line.
#[derive(Debug, Error)]
pub enum ReplyError {
    /// No backend is configured or reachable.
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// The request was sent but failed or returned garbage.
    #[error("collaborator request failed: {0}")]
    Failed(String),

    /// The request timed out.
    #[error("collaborator timed out after {0}ms")]
    Timeout(u64),
}

/// The response collaborator: given the full ordered history, produce the
/// Character's next line.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    /// Request a reply for the given history.
    async fn reply(&self, history: &[ConversationMessage]) -> Result<String, ReplyError>;
}

// ---------------------------------------------------------------------------
// Turn dispatch
// ---------------------------------------------------------------------------

/// A completed turn, ready to append at the next tick boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Which NPC's session this reply belongs to.
    pub npc: NpcId,
    /// The Character's line (fallback text on collaborator failure).
    pub text: String,
    /// True when the fallback apology was substituted.
    pub fallback: bool,
}

/// Runs collaborator round-trips off the frame loop.
///
/// `dispatch` spawns a task per turn; completions arrive on an unbounded
/// channel and are collected by `drain` once per tick. There is no
/// cancellation — closing a dialog does not abort the request, and a late
/// reply still appends to the (hidden) session so it is visible on reopen.
pub struct TurnDispatcher {
    provider: Arc<dyn ReplyProvider>,
    fallback: String,
    tx: mpsc::UnboundedSender<TurnOutcome>,
    rx: mpsc::UnboundedReceiver<TurnOutcome>,
}

impl TurnDispatcher {
    /// Create a dispatcher over the given collaborator.
    #[must_use]
    pub fn new(provider: Arc<dyn ReplyProvider>, fallback: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            provider,
            fallback: fallback.into(),
            tx,
            rx,
        }
    }

    /// Request a reply for `npc` given a snapshot of its history.
    ///
    /// Must be called from within a tokio runtime. The caller is expected
    /// to have set the session's in-flight flag via
    /// [`ConversationSession::begin_turn`] first.
    pub fn dispatch(&self, npc: NpcId, history: Vec<ConversationMessage>) {
        let provider = Arc::clone(&self.provider);
        let fallback = self.fallback.clone();
        let tx = self.tx.clone();
        debug!(npc = %npc, turns = history.len(), "dispatching reply request");
        tokio::spawn(async move {
            let outcome = match provider.reply(&history).await {
                Ok(text) if !text.trim().is_empty() => TurnOutcome {
                    npc,
                    text,
                    fallback: false,
                },
                Ok(_) => {
                    warn!(npc = %npc, "collaborator returned empty text; using fallback");
                    TurnOutcome {
                        npc,
                        text: fallback,
                        fallback: true,
                    }
                }
                Err(e) => {
                    warn!(npc = %npc, error = %e, "collaborator failed; using fallback");
                    TurnOutcome {
                        npc,
                        text: fallback,
                        fallback: true,
                    }
                }
            };
            // Receiver dropped means the game is shutting down.
            let _ = tx.send(outcome);
        });
    }

    /// Collect every completed turn. Called once per tick, before the
    /// zone update, so replies land strictly after all prior messages.
    pub fn drain(&mut self) -> Vec<TurnOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }
}
