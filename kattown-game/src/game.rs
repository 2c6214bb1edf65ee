//! The composition root driven by the embedding engine.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use kattown_core::Result;
use kattown_core::config::GameConfig;
use kattown_core::effects::Effects;
use kattown_core::error::KattownError;
use kattown_core::input::InputQueue;
use kattown_core::registry::ChatSessionRegistry;
use kattown_core::session::{ReplyProvider, TurnDispatcher};
use kattown_core::types::{NpcId, ZoneId};
use kattown_core::zone::{TickContext, Zone, ZoneDispatcher};

use kattown_llm::ChatClient;

use crate::bridge::LlmReplyProvider;
use crate::surface::{TranscriptHandle, TranscriptSurfaceFactory};
use crate::zones::{ComputerLabZone, VillageZone, VolleyballCourtZone, village_id};

/// Kat Town, assembled.
///
/// Owns everything with process lifetime: the zone dispatcher, the chat
/// registry (sessions persist across zone switches), the turn dispatcher,
/// the input queue, and the RNG. The engine calls [`Game::tick`] once per
/// frame and drains the returned commands.
pub struct Game {
    dispatcher: ZoneDispatcher,
    registry: ChatSessionRegistry,
    turns: TurnDispatcher,
    input: InputQueue,
    transcripts: TranscriptSurfaceFactory,
    rng: StdRng,
    started: bool,
}

impl Game {
    /// Assemble the town over an explicit reply collaborator.
    ///
    /// # Errors
    /// Returns `UnknownZone` only if the built-in zone set is broken,
    /// which would be a programming error surfaced at startup.
    pub fn new(config: GameConfig, provider: Arc<dyn ReplyProvider>) -> Result<Self> {
        let zones: Vec<Box<dyn Zone>> = vec![
            Box::new(VillageZone::new(config.clone())),
            Box::new(ComputerLabZone::new(config.clone())),
            Box::new(VolleyballCourtZone::new(config.clone())),
        ];
        let dispatcher = ZoneDispatcher::new(zones, &village_id())?;
        let transcripts = TranscriptSurfaceFactory::new();
        Ok(Self {
            dispatcher,
            registry: ChatSessionRegistry::new(Box::new(transcripts.clone())),
            turns: TurnDispatcher::new(provider, config.chat.fallback_reply.clone()),
            input: InputQueue::new(),
            transcripts,
            rng: StdRng::from_entropy(),
            started: false,
        })
    }

    /// Assemble the town from config alone, building the chat backend
    /// from the `[llm]` section.
    pub fn from_config(config: GameConfig) -> Result<Self> {
        let client = ChatClient::from_config(&config.llm)
            .map_err(|e| KattownError::Config(e.to_string()))?;
        Self::new(config, Arc::new(LlmReplyProvider::new(client)))
    }

    /// Identifier of the active zone.
    #[must_use]
    pub fn current_zone(&self) -> &ZoneId {
        self.dispatcher.current_id()
    }

    /// The input queue; the engine feeds key and pointer events here.
    pub fn input(&mut self) -> &mut InputQueue {
        &mut self.input
    }

    /// Read handle onto an NPC's chat transcript, if ever opened.
    #[must_use]
    pub fn transcript(&self, npc: &NpcId) -> Option<TranscriptHandle> {
        self.transcripts.handle(npc)
    }

    /// Whether a dialog is currently open.
    #[must_use]
    pub fn chat_open(&self) -> bool {
        self.registry.is_open()
    }

    /// Run one frame and return the commands for the engine to apply.
    ///
    /// Order is fixed: completed turns land first (so a reply is visible
    /// the same frame it arrived), then the active zone ticks, with any
    /// requested switch applied before the frame ends.
    ///
    /// # Errors
    /// Returns `UnknownZone` if a trigger targets an unregistered zone.
    pub fn tick(&mut self, dt: f32) -> Result<Effects> {
        let mut effects = Effects::new();
        if !self.started {
            self.started = true;
            info!(zone = %self.dispatcher.current_id(), "starting");
            self.dispatcher.activate(&mut effects);
        }

        for outcome in self.turns.drain() {
            self.registry.deliver(&outcome);
        }

        let snapshot = self.input.snapshot();
        let mut ctx = TickContext {
            dt,
            input: &snapshot,
            registry: &mut self.registry,
            turns: &self.turns,
            rng: &mut self.rng,
            effects: &mut effects,
        };
        self.dispatcher.tick(&mut ctx)?;
        Ok(effects)
    }

    /// Forward a line the player typed into the open dialog.
    ///
    /// Returns false when nothing was sent: no dialog open, a reply
    /// already in flight, or empty text.
    pub fn submit_chat(&mut self, text: &str) -> bool {
        self.registry.submit(text, &self.turns)
    }

    /// Forward the dialog's close button. Returns the owner, if one was open.
    pub fn close_chat(&mut self) -> Option<NpcId> {
        self.registry.close()
    }
}
