//! The computer lab — small interior with a pursuer and a left-edge exit.

use tracing::warn;

use kattown_core::config::GameConfig;
use kattown_core::controller::GameSessionController;
use kattown_core::effects::Effects;
use kattown_core::npc::{Behavior, NpcActor};
use kattown_core::spatial::Rect;
use kattown_core::types::{Position, ZoneId};
use kattown_core::zone::{BoundaryExit, Edge, TickContext, Zone, ZoneTransitionController};

use super::{computer_lab_id, village_id};

const BOUNDS: (f32, f32) = (800.0, 600.0);
const SPAWN: (f32, f32) = (100.0, 445.0);
const EXIT_X: f32 = 70.0;
const PURSUER_SPEED: f32 = 100.0;
const BARK_RADIUS: f32 = 100.0;

/// Lines the angry student talks at you once he catches up.
const BARK_LINES: &[&str] = &[
    "Hey! Want to join my startup for AI-powered toothbrushes?",
    "Let's schedule a quick sync to optimize our synergies!",
    "Have you heard about my blockchain solution for pet food?",
    "Can I pick your brain about my new disruptive app idea?",
    "Let's leverage our core competencies for a win-win situation!",
    "Want to grab a coffee and discuss growth hacking strategies?",
    "I'm looking for a co-founder for my revolutionary fidget spinner 2.0!",
    "Let's pivot our paradigm to a more agile methodology!",
    "Have you considered the potential ROI of investing in my startup?",
    "Want to hear about my groundbreaking idea for a social media platform for plants?",
];

/// Interior zone behind the village's north building. Walking off the
/// left edge returns to the village.
pub struct ComputerLabZone {
    id: ZoneId,
    config: GameConfig,
    controller: Option<GameSessionController>,
}

impl ComputerLabZone {
    /// Build the lab against the shared game config.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            id: computer_lab_id(),
            config,
            controller: None,
        }
    }

    /// The controller for the current visit, if the zone is active.
    #[must_use]
    pub fn controller(&self) -> Option<&GameSessionController> {
        self.controller.as_ref()
    }

    fn pursuer(&self) -> NpcActor {
        NpcActor::new(
            "Angry Student",
            "An angry business student who will not stop pitching.",
            "Serial Founder",
            Position::new(400.0, 400.0),
            self.config.npc.wander_cooldown,
        )
        .with_behavior(Behavior::Pursue {
            speed: PURSUER_SPEED,
            bark_radius: BARK_RADIUS,
            lines: BARK_LINES.iter().map(|s| (*s).to_string()).collect(),
        })
    }
}

impl Zone for ComputerLabZone {
    fn id(&self) -> &ZoneId {
        &self.id
    }

    fn on_enter(&mut self, _effects: &mut Effects) {
        let transitions = ZoneTransitionController::new().with_exit(BoundaryExit::new(
            Edge::Left,
            EXIT_X,
            village_id(),
        ));
        self.controller = Some(GameSessionController::new(
            Rect::new(0.0, 0.0, BOUNDS.0, BOUNDS.1),
            Position::new(SPAWN.0, SPAWN.1),
            vec![self.pursuer()],
            transitions,
            &self.config,
        ));
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) -> Option<ZoneId> {
        let Some(controller) = self.controller.as_mut() else {
            warn!("computer lab ticked before on_enter");
            return None;
        };
        controller.tick(ctx)
    }

    fn on_exit(&mut self, _effects: &mut Effects) {
        self.controller = None;
    }
}
