//! The volleyball court — open interior with a right-edge exit.

use tracing::warn;

use kattown_core::config::GameConfig;
use kattown_core::controller::GameSessionController;
use kattown_core::effects::Effects;
use kattown_core::spatial::Rect;
use kattown_core::types::{Position, ZoneId};
use kattown_core::zone::{BoundaryExit, Edge, TickContext, Zone, ZoneTransitionController};

use super::{village_id, volleyball_court_id};

const BOUNDS: (f32, f32) = (800.0, 600.0);
const SPAWN: (f32, f32) = (200.0, 500.0);
const EXIT_X: f32 = 750.0;

/// Interior zone behind the village's south building. Walking off the
/// right edge returns to the village.
pub struct VolleyballCourtZone {
    id: ZoneId,
    config: GameConfig,
    controller: Option<GameSessionController>,
}

impl VolleyballCourtZone {
    /// Build the court against the shared game config.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            id: volleyball_court_id(),
            config,
            controller: None,
        }
    }

    /// The controller for the current visit, if the zone is active.
    #[must_use]
    pub fn controller(&self) -> Option<&GameSessionController> {
        self.controller.as_ref()
    }
}

impl Zone for VolleyballCourtZone {
    fn id(&self) -> &ZoneId {
        &self.id
    }

    fn on_enter(&mut self, _effects: &mut Effects) {
        let transitions = ZoneTransitionController::new().with_exit(BoundaryExit::new(
            Edge::Right,
            EXIT_X,
            village_id(),
        ));
        self.controller = Some(GameSessionController::new(
            Rect::new(0.0, 0.0, BOUNDS.0, BOUNDS.1),
            Position::new(SPAWN.0, SPAWN.1),
            Vec::new(),
            transitions,
            &self.config,
        ));
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) -> Option<ZoneId> {
        let Some(controller) = self.controller.as_mut() else {
            warn!("volleyball court ticked before on_enter");
            return None;
        };
        controller.tick(ctx)
    }

    fn on_exit(&mut self, _effects: &mut Effects) {
        self.controller = None;
    }
}
