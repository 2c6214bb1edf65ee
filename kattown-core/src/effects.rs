//! Commands issued to the external rendering/audio engine.
//!
//! The core never owns playback, widgets, or mixing. Each tick it appends
//! [`EngineCommand`]s into an [`Effects`] buffer; the embedder drains the
//! buffer and performs them with whatever engine it has.

use crate::types::{Direction, NpcId};

/// Entity addressed by an engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRef {
    /// The player avatar.
    Player,
    /// An NPC, by identity.
    Npc(NpcId),
}

/// One command for the external engine.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCommand {
    /// Play a named animation loop on an entity.
    PlayAnimation {
        /// Target entity.
        entity: EntityRef,
        /// Animation key, e.g. `player_walking`.
        animation: String,
    },
    /// Face an entity along a direction (sprite flip is the engine's call).
    SetFacing {
        /// Target entity.
        entity: EntityRef,
        /// New facing.
        facing: Direction,
    },
    /// Show an NPC's hover affordance (expertise label + pointer cursor).
    ShowAffordance {
        /// Which NPC.
        npc: NpcId,
        /// Label text, e.g. `Expert Fisherman`.
        label: String,
    },
    /// Hide an NPC's hover affordance.
    HideAffordance {
        /// Which NPC.
        npc: NpcId,
    },
    /// Show the "you may enter" prompt over a structure.
    ShowEnterPrompt {
        /// Index of the structure within the zone.
        structure: usize,
    },
    /// Hide the enter prompt.
    HideEnterPrompt {
        /// Index of the structure within the zone.
        structure: usize,
    },
    /// Start a looping music track.
    PlayMusic {
        /// Track key.
        track: String,
    },
    /// Stop the current music track.
    StopMusic,
    /// A pursuing NPC blurts a line in a speech bubble.
    Bark {
        /// Which NPC.
        npc: NpcId,
        /// The line.
        line: String,
    },
}

/// Per-tick append buffer of engine commands.
#[derive(Debug, Default)]
pub struct Effects {
    commands: Vec<EngineCommand>,
}

impl Effects {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command.
    pub fn push(&mut self, command: EngineCommand) {
        self.commands.push(command);
    }

    /// Commands accumulated so far this tick.
    #[must_use]
    pub fn commands(&self) -> &[EngineCommand] {
        &self.commands
    }

    /// Take all accumulated commands, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<EngineCommand> {
        std::mem::take(&mut self.commands)
    }
}
