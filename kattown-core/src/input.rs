//! Polled input contract.
//!
//! Instead of re-entrant event callbacks, the embedder feeds key and
//! pointer events into an [`InputQueue`] as they happen; once per tick the
//! core takes an [`InputSnapshot`], which copies the held directional
//! state and drains the pointer-activation queue. Processing is therefore
//! deterministic within a tick.

use crate::types::{Direction, NpcId};

/// Accumulates raw input between ticks.
#[derive(Debug, Default)]
pub struct InputQueue {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    clicks: Vec<NpcId>,
    hover: Option<NpcId>,
}

impl InputQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directional key going down.
    pub fn press(&mut self, direction: Direction) {
        self.set(direction, true);
    }

    /// Record a directional key going up.
    pub fn release(&mut self, direction: Direction) {
        self.set(direction, false);
    }

    /// Record a pointer activation over an NPC.
    pub fn click(&mut self, npc: NpcId) {
        self.clicks.push(npc);
    }

    /// Record which NPC (if any) the pointer currently rests over.
    pub fn hover(&mut self, npc: Option<NpcId>) {
        self.hover = npc;
    }

    /// Take the per-tick snapshot. Held keys persist; the click queue is
    /// drained so each activation is processed exactly once.
    pub fn snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
            clicks: std::mem::take(&mut self.clicks),
            hover: self.hover.clone(),
        }
    }

    fn set(&mut self, direction: Direction, is_down: bool) {
        match direction {
            Direction::Up => self.up = is_down,
            Direction::Down => self.down = is_down,
            Direction::Left => self.left = is_down,
            Direction::Right => self.right = is_down,
        }
    }
}

/// Input state for one tick.
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    /// Up key held.
    pub up: bool,
    /// Down key held.
    pub down: bool,
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
    /// NPCs the pointer was activated over since the last tick.
    pub clicks: Vec<NpcId>,
    /// NPC the pointer currently rests over.
    pub hover: Option<NpcId>,
}

impl InputSnapshot {
    /// Whether any directional key is held.
    #[must_use]
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Hold-forward, as a structure entry trigger reads it.
    #[must_use]
    pub fn hold_forward(&self) -> bool {
        self.up
    }

    /// Resolve held keys into a velocity vector at `speed` units/sec.
    ///
    /// Opposing keys are not summed: left wins over right, up over down.
    #[must_use]
    pub fn velocity(&self, speed: f32) -> (f32, f32) {
        let vx = if self.left {
            -speed
        } else if self.right {
            speed
        } else {
            0.0
        };
        let vy = if self.up {
            -speed
        } else if self.down {
            speed
        } else {
            0.0
        };
        (vx, vy)
    }
}
