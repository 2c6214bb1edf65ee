//! NPC actors — the wander state machine and the chat-trigger state.

use rand::Rng;
use rand::RngCore;
use tracing::debug;

use crate::effects::{Effects, EngineCommand};
use crate::spatial::{self, Rect};
use crate::types::{Direction, NpcId, Position};

/// Movement behavior for an actor.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Re-roll a uniform 4-way direction every cooldown, stepping one
    /// unit per tick. The default villager behavior.
    Wander,
    /// Walk straight at the player, stopping inside `bark_radius` to
    /// blurt one of `lines`. One bark per entry into the radius.
    Pursue {
        /// Approach speed in units per second.
        speed: f32,
        /// Distance at which the pursuer stops and talks at you.
        bark_radius: f32,
        /// Canned lines to pick from.
        lines: Vec<String>,
    },
}

/// A non-player character in the active zone.
///
/// `is_chatting` freezes movement entirely; the wander timer does not
/// advance while a dialog with this NPC is open.
#[derive(Debug)]
pub struct NpcActor {
    id: NpcId,
    /// Display name.
    pub name: String,
    /// Persona prompt seeded into this NPC's conversation session.
    pub persona: String,
    /// Short label shown by the hover affordance.
    pub expertise: String,
    /// Current position.
    pub position: Position,
    /// Current facing, also the wander movement axis.
    pub facing: Direction,
    wander_timer: u32,
    wander_cooldown: u32,
    is_chatting: bool,
    behavior: Behavior,
    in_bark_radius: bool,
}

impl NpcActor {
    /// Create a wandering villager.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        persona: impl Into<String>,
        expertise: impl Into<String>,
        position: Position,
        wander_cooldown: u32,
    ) -> Self {
        let name = name.into();
        Self {
            id: NpcId::from_name(&name),
            name,
            persona: persona.into(),
            expertise: expertise.into(),
            position,
            facing: Direction::Down,
            wander_timer: 0,
            wander_cooldown,
            is_chatting: false,
            behavior: Behavior::Wander,
            in_bark_radius: false,
        }
    }

    /// Create an actor with a custom behavior.
    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Stable identity key.
    #[must_use]
    pub fn id(&self) -> &NpcId {
        &self.id
    }

    /// Whether a dialog with this NPC is open.
    #[must_use]
    pub fn is_chatting(&self) -> bool {
        self.is_chatting
    }

    /// Freeze movement for the duration of a chat.
    pub fn open_chat(&mut self) {
        self.is_chatting = true;
    }

    /// Resume movement.
    pub fn close_chat(&mut self) {
        self.is_chatting = false;
    }

    /// The shared interaction predicate: gates both the hover affordance
    /// and click-to-open, so UI and logic can never disagree.
    #[must_use]
    pub fn player_in_range(&self, player: Position, range: f32) -> bool {
        spatial::within_range(self.position, player, range)
    }

    /// Advance one tick of movement. Frozen entirely while chatting.
    pub fn advance(
        &mut self,
        dt: f32,
        player: Position,
        bounds: &Rect,
        rng: &mut dyn RngCore,
        effects: &mut Effects,
    ) {
        if self.is_chatting {
            return;
        }
        match &self.behavior {
            Behavior::Wander => self.wander(bounds, rng),
            Behavior::Pursue {
                speed,
                bark_radius,
                lines,
            } => {
                let (speed, bark_radius) = (*speed, *bark_radius);
                let lines = lines.clone();
                self.pursue(dt, player, bounds, speed, bark_radius, &lines, rng, effects);
            }
        }
    }

    fn wander(&mut self, bounds: &Rect, rng: &mut dyn RngCore) {
        if self.wander_timer == 0 {
            // Re-roll happens on the tick the timer expires; the new
            // direction still moves this tick.
            self.facing = Direction::roll(rng);
            self.wander_timer = self.wander_cooldown;
            debug!(npc = %self.id, facing = ?self.facing, "wander re-roll");
        }
        let (dx, dy) = self.facing.offset();
        self.position = bounds.clamp(Position::new(self.position.x + dx, self.position.y + dy));
        // saturates so a zero cooldown re-rolls every tick instead of
        // underflowing
        self.wander_timer = self.wander_timer.saturating_sub(1);
    }

    #[allow(clippy::too_many_arguments)]
    fn pursue(
        &mut self,
        dt: f32,
        player: Position,
        bounds: &Rect,
        speed: f32,
        bark_radius: f32,
        lines: &[String],
        rng: &mut dyn RngCore,
        effects: &mut Effects,
    ) {
        let dist = spatial::distance(self.position, player);
        if dist > bark_radius {
            self.in_bark_radius = false;
            if dist > f32::EPSILON {
                let step = speed * dt / dist;
                self.position = bounds.clamp(Position::new(
                    self.position.x + (player.x - self.position.x) * step,
                    self.position.y + (player.y - self.position.y) * step,
                ));
            }
        } else if !self.in_bark_radius {
            self.in_bark_radius = true;
            if !lines.is_empty() {
                let line = lines[rng.gen_range(0..lines.len())].clone();
                effects.push(EngineCommand::Bark {
                    npc: self.id.clone(),
                    line,
                });
            }
        }
    }
}
