//! Zone transitions and the zone capability interface.
//!
//! Two trigger shapes exist. An enterable structure requires the player
//! to stand in its entry band and hold forward for a full count of
//! consecutive ticks; leaving the band at any point is a full abort, not
//! a pause. A boundary exit is the degenerate case: a single positional
//! threshold with no hold requirement (walk far enough off the edge).
//!
//! Zones themselves are independent tagged variants behind the [`Zone`]
//! trait, composed by a [`ZoneDispatcher`] that holds the current zone by
//! identifier. There is no scene inheritance chain.

use rand::RngCore;
use tracing::{debug, info};

use crate::effects::Effects;
use crate::error::KattownError;
use crate::input::InputSnapshot;
use crate::registry::ChatSessionRegistry;
use crate::session::TurnDispatcher;
use crate::spatial::Rect;
use crate::types::{Position, ZoneId};

// ---------------------------------------------------------------------------
// Triggers
// ---------------------------------------------------------------------------

/// Event produced by evaluating the transition triggers for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEvent {
    /// The player walked into a structure's entry band.
    AffordanceShown {
        /// Index of the structure within the zone.
        structure: usize,
    },
    /// The player left the entry band (or the trigger fired).
    AffordanceHidden {
        /// Index of the structure within the zone.
        structure: usize,
    },
    /// The hold completed (or a boundary was crossed): switch zones.
    SwitchRequested {
        /// Zone to activate.
        target: ZoneId,
    },
}

/// Proximity-gated entry trigger for an enterable structure.
///
/// The entry band is measured from the structure's anchor: horizontally
/// within `width / 2` of `x`, vertically within `band` of `y + height/2`
/// (the doorway sits at the foot of the sprite).
#[derive(Debug, Clone)]
pub struct StructureTrigger {
    bounds: Rect,
    target: ZoneId,
    band: f32,
    hold_frames: u32,
    counter: u32,
    in_range: bool,
}

impl StructureTrigger {
    /// Create a trigger for a structure leading to `target`.
    #[must_use]
    pub fn new(bounds: Rect, target: ZoneId, band: f32, hold_frames: u32) -> Self {
        Self {
            bounds,
            target,
            band,
            hold_frames,
            counter: hold_frames,
            in_range: false,
        }
    }

    /// Remaining hold ticks before the trigger fires.
    #[must_use]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Whether the affordance is currently showing.
    #[must_use]
    pub fn in_range(&self) -> bool {
        self.in_range
    }

    /// Whether a position lies inside the structure's solid body.
    ///
    /// Structures are collidable: the player walks up against the wall
    /// and stays put, which is what keeps them inside the entry band for
    /// the whole hold.
    #[must_use]
    pub fn blocks(&self, position: Position) -> bool {
        (position.x - self.bounds.x).abs() <= self.bounds.width / 2.0
            && (position.y - self.bounds.y).abs() <= self.bounds.height / 2.0
    }

    /// Returns true when the hold completed and a switch was requested.
    fn tick(
        &mut self,
        index: usize,
        player: Position,
        hold_forward: bool,
        events: &mut Vec<TransitionEvent>,
    ) -> bool {
        let dx = (player.x - self.bounds.x).abs();
        let dy = (player.y - (self.bounds.y + self.bounds.height / 2.0)).abs();
        let near = dx <= self.bounds.width / 2.0 && dy <= self.band;

        if near {
            if !self.in_range {
                self.in_range = true;
                events.push(TransitionEvent::AffordanceShown { structure: index });
            }
            if hold_forward {
                // saturates so a zero hold requirement fires on the
                // first in-range hold tick instead of underflowing
                self.counter = self.counter.saturating_sub(1);
                if self.counter == 0 {
                    info!(target = %self.target, "structure hold complete; requesting switch");
                    events.push(TransitionEvent::SwitchRequested {
                        target: self.target.clone(),
                    });
                    events.push(TransitionEvent::AffordanceHidden { structure: index });
                    self.counter = self.hold_frames;
                    self.in_range = false;
                    return true;
                }
            }
        } else {
            // Full abort: leaving the band resets the hold entirely.
            if self.in_range {
                events.push(TransitionEvent::AffordanceHidden { structure: index });
            }
            self.in_range = false;
            self.counter = self.hold_frames;
        }
        false
    }
}

/// Which world edge a boundary exit watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Crossed when `x <= threshold`.
    Left,
    /// Crossed when `x >= threshold`.
    Right,
    /// Crossed when `y <= threshold`.
    Top,
    /// Crossed when `y >= threshold`.
    Bottom,
}

/// Positional-threshold exit with no hold requirement.
#[derive(Debug, Clone)]
pub struct BoundaryExit {
    edge: Edge,
    threshold: f32,
    target: ZoneId,
}

impl BoundaryExit {
    /// Create an exit crossing `edge` at `threshold` into `target`.
    #[must_use]
    pub fn new(edge: Edge, threshold: f32, target: ZoneId) -> Self {
        Self {
            edge,
            threshold,
            target,
        }
    }

    fn crossed(&self, player: Position) -> bool {
        match self.edge {
            Edge::Left => player.x <= self.threshold,
            Edge::Right => player.x >= self.threshold,
            Edge::Top => player.y <= self.threshold,
            Edge::Bottom => player.y >= self.threshold,
        }
    }
}

/// All transition triggers for one zone.
#[derive(Debug, Default)]
pub struct ZoneTransitionController {
    triggers: Vec<StructureTrigger>,
    exits: Vec<BoundaryExit>,
}

impl ZoneTransitionController {
    /// Create an empty controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enterable-structure trigger.
    #[must_use]
    pub fn with_structure(mut self, trigger: StructureTrigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Add a boundary exit.
    #[must_use]
    pub fn with_exit(mut self, exit: BoundaryExit) -> Self {
        self.exits.push(exit);
        self
    }

    /// The structure triggers, for affordance state inspection.
    #[must_use]
    pub fn structures(&self) -> &[StructureTrigger] {
        &self.triggers
    }

    /// Evaluate every trigger against the player's position for one tick.
    ///
    /// At most one `SwitchRequested` is emitted per tick; structures are
    /// checked before boundary exits.
    pub fn evaluate(&mut self, player: Position, hold_forward: bool) -> Vec<TransitionEvent> {
        let mut events = Vec::new();
        let mut switched = false;
        for (index, trigger) in self.triggers.iter_mut().enumerate() {
            if trigger.tick(index, player, hold_forward, &mut events) {
                switched = true;
                break;
            }
        }

        if !switched {
            for exit in &self.exits {
                if exit.crossed(player) {
                    debug!(target = %exit.target, "boundary exit crossed");
                    events.push(TransitionEvent::SwitchRequested {
                        target: exit.target.clone(),
                    });
                    break;
                }
            }
        }
        events
    }
}

// ---------------------------------------------------------------------------
// Zone capability interface
// ---------------------------------------------------------------------------

/// Everything a zone may touch during one tick.
pub struct TickContext<'a> {
    /// Seconds since the previous tick.
    pub dt: f32,
    /// This tick's input snapshot.
    pub input: &'a InputSnapshot,
    /// The process-wide chat registry (sessions outlive zones).
    pub registry: &'a mut ChatSessionRegistry,
    /// Dispatcher for collaborator round-trips.
    pub turns: &'a TurnDispatcher,
    /// RNG for wander re-rolls and barks.
    pub rng: &'a mut dyn RngCore,
    /// Engine command buffer.
    pub effects: &'a mut Effects,
}

/// A discrete playable area.
///
/// `on_enter` must rebuild the zone's actors and structures fresh — no
/// movement state carries across switches; only chat sessions persist,
/// because the registry lives outside the dispatcher.
pub trait Zone: Send {
    /// Stable identifier used by switch requests.
    fn id(&self) -> &ZoneId;
    /// Activate: recreate entities, start music.
    fn on_enter(&mut self, effects: &mut Effects);
    /// One frame. Returns a zone switch request, if any.
    fn on_tick(&mut self, ctx: &mut TickContext<'_>) -> Option<ZoneId>;
    /// Deactivate: stop music, drop transient state.
    fn on_exit(&mut self, effects: &mut Effects);
}

/// Holds all zones and performs "deactivate current, activate by id".
pub struct ZoneDispatcher {
    zones: Vec<Box<dyn Zone>>,
    current: usize,
}

impl ZoneDispatcher {
    /// Create a dispatcher starting at `initial`.
    ///
    /// # Errors
    /// Returns `UnknownZone` if `initial` matches no zone.
    pub fn new(zones: Vec<Box<dyn Zone>>, initial: &ZoneId) -> crate::Result<Self> {
        let current = zones
            .iter()
            .position(|z| z.id() == initial)
            .ok_or_else(|| KattownError::UnknownZone(initial.clone()))?;
        Ok(Self { zones, current })
    }

    /// Identifier of the active zone.
    #[must_use]
    pub fn current_id(&self) -> &ZoneId {
        self.zones[self.current].id()
    }

    /// Activate the current zone. Called once at startup.
    pub fn activate(&mut self, effects: &mut Effects) {
        self.zones[self.current].on_enter(effects);
    }

    /// Tick the active zone, applying any switch it requests.
    ///
    /// # Errors
    /// Returns `UnknownZone` if a switch targets an unregistered zone.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> crate::Result<()> {
        let request = self.zones[self.current].on_tick(ctx);
        if let Some(target) = request {
            self.switch_to(&target, ctx.effects)?;
        }
        Ok(())
    }

    /// Deactivate the current zone and activate `target`.
    ///
    /// # Errors
    /// Returns `UnknownZone` if `target` matches no zone.
    pub fn switch_to(&mut self, target: &ZoneId, effects: &mut Effects) -> crate::Result<()> {
        let next = self
            .zones
            .iter()
            .position(|z| z.id() == target)
            .ok_or_else(|| KattownError::UnknownZone(target.clone()))?;
        info!(from = %self.current_id(), to = %target, "zone switch");
        self.zones[self.current].on_exit(effects);
        self.current = next;
        self.zones[self.current].on_enter(effects);
        Ok(())
    }
}
