//! The village — the hub zone with the NPC cast and two enterable
//! buildings.

use tracing::warn;

use kattown_core::config::GameConfig;
use kattown_core::controller::GameSessionController;
use kattown_core::effects::{Effects, EngineCommand};
use kattown_core::npc::NpcActor;
use kattown_core::spatial::Rect;
use kattown_core::types::{Position, ZoneId};
use kattown_core::zone::{StructureTrigger, TickContext, Zone, ZoneTransitionController};

use super::{computer_lab_id, village_id, volleyball_court_id};

const BOUNDS: (f32, f32) = (1080.0, 890.0);
const SPAWN: (f32, f32) = (360.0, 300.0);
const MUSIC_TRACK: &str = "village_theme";

/// The hub zone. Looping theme music plays for the whole visit.
pub struct VillageZone {
    id: ZoneId,
    config: GameConfig,
    controller: Option<GameSessionController>,
}

impl VillageZone {
    /// Build the village against the shared game config.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            id: village_id(),
            config,
            controller: None,
        }
    }

    /// The controller for the current visit, if the zone is active.
    #[must_use]
    pub fn controller(&self) -> Option<&GameSessionController> {
        self.controller.as_ref()
    }

    fn cast(&self) -> Vec<NpcActor> {
        let cooldown = self.config.npc.wander_cooldown;
        vec![
            NpcActor::new(
                "Kev",
                "Kev is a huge fishing lover. His dream is to become a captain \
                 just like your uncle who left to travel the world.",
                "Expert Fisherman",
                Position::new(656.0, 500.0),
                cooldown,
            ),
            NpcActor::new(
                "Ellie",
                "Ellie left home dreaming of distant shores and still talks \
                 about the places she means to see.",
                "Adventurer",
                Position::new(1000.0, 300.0),
                cooldown,
            ),
            NpcActor::new(
                "Kenji",
                "Kenji is a cheerful guy who knows every story this village \
                 has ever told about itself.",
                "Village Historian",
                Position::new(200.0, 170.0),
                cooldown,
            ),
        ]
    }

    fn transitions(&self) -> ZoneTransitionController {
        let band = self.config.transition.vertical_band;
        let hold = self.config.transition.hold_frames;
        ZoneTransitionController::new()
            .with_structure(StructureTrigger::new(
                Rect::new(305.0, 147.0, 126.0, 83.0),
                computer_lab_id(),
                band,
                hold,
            ))
            .with_structure(StructureTrigger::new(
                Rect::new(637.0, 394.0, 133.0, 73.0),
                volleyball_court_id(),
                band,
                hold,
            ))
    }
}

impl Zone for VillageZone {
    fn id(&self) -> &ZoneId {
        &self.id
    }

    fn on_enter(&mut self, effects: &mut Effects) {
        self.controller = Some(GameSessionController::new(
            Rect::new(0.0, 0.0, BOUNDS.0, BOUNDS.1),
            Position::new(SPAWN.0, SPAWN.1),
            self.cast(),
            self.transitions(),
            &self.config,
        ));
        effects.push(EngineCommand::PlayMusic {
            track: MUSIC_TRACK.to_string(),
        });
    }

    fn on_tick(&mut self, ctx: &mut TickContext<'_>) -> Option<ZoneId> {
        let Some(controller) = self.controller.as_mut() else {
            warn!("village ticked before on_enter");
            return None;
        };
        controller.tick(ctx)
    }

    fn on_exit(&mut self, effects: &mut Effects) {
        effects.push(EngineCommand::StopMusic);
        self.controller = None;
    }
}
