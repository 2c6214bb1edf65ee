//! Per-zone orchestration: the frame tick that ties everything together.
//!
//! Tick order is fixed: chat suppression first, then player movement,
//! then NPC movement, then transition triggers, then pointer handling.
//! While a dialog is open the zone is otherwise suppressed for that tick;
//! directional input is read as an implicit "close the chat", and
//! movement resumes on the following tick, never the same one.

use tracing::debug;

use crate::config::GameConfig;
use crate::effects::{EngineCommand, EntityRef};
use crate::npc::NpcActor;
use crate::spatial::Rect;
use crate::types::{AnimationState, Direction, NpcId, Position, ZoneId};
use crate::zone::{TickContext, TransitionEvent, ZoneTransitionController};

/// The player-controlled avatar within one zone.
#[derive(Debug)]
pub struct PlayerAvatar {
    /// Current position.
    pub position: Position,
    /// Last horizontal facing (for sprite flip).
    pub facing: Direction,
    /// Walking/Idle label; playback itself is delegated.
    pub animation: AnimationState,
}

impl PlayerAvatar {
    /// Spawn the avatar at a position, idle and facing right.
    #[must_use]
    pub fn spawn(position: Position) -> Self {
        Self {
            position,
            facing: Direction::Right,
            animation: AnimationState::Idle,
        }
    }
}

/// Orchestrates one zone's entities for the duration of a visit.
///
/// Owns the avatar, the NPC actors, and the transition triggers; all are
/// recreated fresh each time the zone is entered. The chat registry is
/// *not* owned here — it is passed in per tick so sessions outlive zones.
pub struct GameSessionController {
    bounds: Rect,
    player: PlayerAvatar,
    npcs: Vec<NpcActor>,
    transitions: ZoneTransitionController,
    speed: f32,
    interaction_range: f32,
    hovered: Option<NpcId>,
}

impl GameSessionController {
    /// Build a controller for one zone visit.
    #[must_use]
    pub fn new(
        bounds: Rect,
        spawn: Position,
        npcs: Vec<NpcActor>,
        transitions: ZoneTransitionController,
        config: &GameConfig,
    ) -> Self {
        Self {
            bounds,
            player: PlayerAvatar::spawn(spawn),
            npcs,
            transitions,
            speed: config.movement.speed,
            interaction_range: config.npc.interaction_range,
            hovered: None,
        }
    }

    /// The avatar.
    #[must_use]
    pub fn player(&self) -> &PlayerAvatar {
        &self.player
    }

    /// All NPC actors in the zone.
    #[must_use]
    pub fn npcs(&self) -> &[NpcActor] {
        &self.npcs
    }

    /// Look up an actor by identity.
    #[must_use]
    pub fn npc(&self, id: &NpcId) -> Option<&NpcActor> {
        self.npcs.iter().find(|n| n.id() == id)
    }

    /// Run one frame. Returns a zone switch request, if a trigger fired.
    pub fn tick(&mut self, ctx: &mut TickContext<'_>) -> Option<ZoneId> {
        // (1) Open dialog suppresses the zone; directional input closes it.
        if ctx.registry.is_open() {
            if ctx.input.any_direction() {
                if let Some(owner) = ctx.registry.close() {
                    if let Some(actor) = self.npcs.iter_mut().find(|n| n.id() == &owner) {
                        actor.close_chat();
                    }
                }
            }
            return None;
        }

        // Chat may have been closed externally (dialog close button)
        // since the last tick; unfreeze any actor still marked chatting.
        for npc in &mut self.npcs {
            if npc.is_chatting() {
                npc.close_chat();
            }
        }

        // (2) Player movement.
        self.move_player(ctx);

        // (3) NPC movement.
        for npc in &mut self.npcs {
            npc.advance(ctx.dt, self.player.position, &self.bounds, ctx.rng, ctx.effects);
        }

        // (4) Zone transitions, against the updated position.
        let mut switch = None;
        for event in self
            .transitions
            .evaluate(self.player.position, ctx.input.hold_forward())
        {
            match event {
                TransitionEvent::AffordanceShown { structure } => {
                    ctx.effects.push(EngineCommand::ShowEnterPrompt { structure });
                }
                TransitionEvent::AffordanceHidden { structure } => {
                    ctx.effects.push(EngineCommand::HideEnterPrompt { structure });
                }
                TransitionEvent::SwitchRequested { target } => {
                    switch = Some(target);
                }
            }
        }

        // (5) Pointer handling: hover affordance and click-to-open, both
        // gated by the same range predicate.
        self.update_hover(ctx);
        self.handle_clicks(ctx);

        switch
    }

    fn move_player(&mut self, ctx: &mut TickContext<'_>) {
        let (vx, vy) = ctx.input.velocity(self.speed);
        let candidate = self.bounds.clamp(Position::new(
            self.player.position.x + vx * ctx.dt,
            self.player.position.y + vy * ctx.dt,
        ));
        // Structures are solid; a blocked step is cancelled, leaving the
        // player pressed against the wall (and inside the entry band).
        if !self
            .transitions
            .structures()
            .iter()
            .any(|s| s.blocks(candidate))
        {
            self.player.position = candidate;
        }

        if vx < 0.0 && self.player.facing != Direction::Left {
            self.player.facing = Direction::Left;
            ctx.effects.push(EngineCommand::SetFacing {
                entity: EntityRef::Player,
                facing: Direction::Left,
            });
        } else if vx > 0.0 && self.player.facing != Direction::Right {
            self.player.facing = Direction::Right;
            ctx.effects.push(EngineCommand::SetFacing {
                entity: EntityRef::Player,
                facing: Direction::Right,
            });
        }

        let animation = if vx != 0.0 || vy != 0.0 {
            AnimationState::Walking
        } else {
            AnimationState::Idle
        };
        if animation != self.player.animation {
            self.player.animation = animation;
            let key = match animation {
                AnimationState::Walking => "player_walking",
                AnimationState::Idle => "player_idle",
            };
            ctx.effects.push(EngineCommand::PlayAnimation {
                entity: EntityRef::Player,
                animation: key.to_string(),
            });
        }
    }

    fn update_hover(&mut self, ctx: &mut TickContext<'_>) {
        let desired = ctx.input.hover.as_ref().and_then(|id| {
            self.npcs
                .iter()
                .find(|n| n.id() == id && n.player_in_range(self.player.position, self.interaction_range))
                .map(|n| (n.id().clone(), n.expertise.clone()))
        });

        let unchanged = matches!(
            (&self.hovered, &desired),
            (Some(old), Some((new, _))) if old == new
        );
        if unchanged {
            return;
        }
        if let Some(old) = self.hovered.take() {
            ctx.effects.push(EngineCommand::HideAffordance { npc: old });
        }
        if let Some((npc, label)) = desired {
            ctx.effects.push(EngineCommand::ShowAffordance {
                npc: npc.clone(),
                label,
            });
            self.hovered = Some(npc);
        }
    }

    fn handle_clicks(&mut self, ctx: &mut TickContext<'_>) {
        for clicked in &ctx.input.clicks {
            let Some(actor) = self.npcs.iter_mut().find(|n| n.id() == clicked) else {
                debug!(npc = %clicked, "click on unknown NPC ignored");
                continue;
            };
            if !actor.player_in_range(self.player.position, self.interaction_range) {
                debug!(npc = %clicked, "click out of range ignored");
                continue;
            }
            if ctx.registry.open(actor.id(), &actor.persona) {
                actor.open_chat();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::ThreadRng;

    use super::*;
    use crate::effects::Effects;
    use crate::input::InputQueue;
    use crate::registry::{ChatSessionRegistry, NullDialogFactory};
    use crate::session::{ConversationMessage, ReplyError, ReplyProvider, TurnDispatcher};
    use crate::types::Direction;

    struct NeverProvider;

    #[async_trait::async_trait]
    impl ReplyProvider for NeverProvider {
        async fn reply(&self, _history: &[ConversationMessage]) -> Result<String, ReplyError> {
            Err(ReplyError::Unavailable("test".into()))
        }
    }

    struct Harness {
        controller: GameSessionController,
        registry: ChatSessionRegistry,
        turns: TurnDispatcher,
        input: InputQueue,
        rng: ThreadRng,
    }

    impl Harness {
        fn new() -> Self {
            let config = GameConfig::default();
            let npcs = vec![NpcActor::new(
                "Kev",
                "Kev is a huge fishing lover.",
                "Expert Fisherman",
                Position::new(500.0, 300.0),
                config.npc.wander_cooldown,
            )];
            Self {
                controller: GameSessionController::new(
                    Rect::new(0.0, 0.0, 1080.0, 890.0),
                    Position::new(360.0, 300.0),
                    npcs,
                    ZoneTransitionController::new(),
                    &config,
                ),
                registry: ChatSessionRegistry::new(Box::new(NullDialogFactory)),
                turns: TurnDispatcher::new(std::sync::Arc::new(NeverProvider), "sorry"),
                input: InputQueue::new(),
                rng: rand::thread_rng(),
            }
        }

        fn tick(&mut self) -> (Option<ZoneId>, Effects) {
            let snapshot = self.input.snapshot();
            let mut effects = Effects::new();
            let switch = {
                let mut ctx = TickContext {
                    dt: 0.02,
                    input: &snapshot,
                    registry: &mut self.registry,
                    turns: &self.turns,
                    rng: &mut self.rng,
                    effects: &mut effects,
                };
                self.controller.tick(&mut ctx)
            };
            (switch, effects)
        }
    }

    fn kev() -> NpcId {
        NpcId::from_name("Kev")
    }

    #[test]
    fn movement_integrates_and_clamps() {
        let mut h = Harness::new();
        h.input.press(Direction::Right);
        let x0 = h.controller.player().position.x;
        h.tick();
        let x1 = h.controller.player().position.x;
        assert!((x1 - x0 - 160.0 * 0.02).abs() < 1e-3);
    }

    #[test]
    fn click_in_range_opens_chat_and_freezes_npc() {
        let mut h = Harness::new();
        // Player at (360,300), Kev at (500,300): distance 140 < 230.
        h.input.click(kev());
        h.tick();

        assert_eq!(h.registry.active(), Some(&kev()));
        assert!(h.controller.npc(&kev()).is_some_and(NpcActor::is_chatting));
    }

    #[test]
    fn click_out_of_range_is_ignored() {
        let mut h = Harness::new();
        // Walk the player far away first.
        h.input.press(Direction::Left);
        for _ in 0..200 {
            h.tick();
        }
        h.input.release(Direction::Left);

        h.input.click(kev());
        h.tick();
        assert!(h.registry.active().is_none());
    }

    #[test]
    fn directional_input_closes_chat_and_movement_resumes_next_tick() {
        let mut h = Harness::new();
        h.input.click(kev());
        h.tick();
        assert!(h.registry.is_open());

        let pos_before = h.controller.player().position;
        h.input.press(Direction::Right);
        h.tick();
        // Same tick: chat closed, but no movement yet.
        assert!(!h.registry.is_open());
        assert_eq!(h.controller.player().position, pos_before);
        assert!(!h.controller.npc(&kev()).is_some_and(NpcActor::is_chatting));

        h.tick();
        assert!(h.controller.player().position.x > pos_before.x);
    }

    #[test]
    fn movement_is_fully_suppressed_while_chat_open() {
        let mut h = Harness::new();
        h.input.click(kev());
        h.tick();

        let pos = h.controller.player().position;
        // No directional input: chat stays open, nothing moves.
        for _ in 0..10 {
            h.tick();
        }
        assert!(h.registry.is_open());
        assert_eq!(h.controller.player().position, pos);
    }

    #[test]
    fn walk_animation_command_emitted_on_change_only() {
        let mut h = Harness::new();
        h.input.press(Direction::Down);
        let (_, effects) = h.tick();
        let walk_commands = effects
            .commands()
            .iter()
            .filter(|c| matches!(c, EngineCommand::PlayAnimation { .. }))
            .count();
        assert_eq!(walk_commands, 1);

        // Still walking: no repeat command.
        let (_, effects) = h.tick();
        assert!(
            !effects
                .commands()
                .iter()
                .any(|c| matches!(c, EngineCommand::PlayAnimation { .. }))
        );

        h.input.release(Direction::Down);
        let (_, effects) = h.tick();
        assert!(effects.commands().iter().any(|c| matches!(
            c,
            EngineCommand::PlayAnimation { animation, .. } if animation == "player_idle"
        )));
    }

    #[test]
    fn walking_into_a_structure_pins_the_player_and_completes_the_hold() {
        use crate::zone::StructureTrigger;

        let config = GameConfig::default();
        let trigger = StructureTrigger::new(
            Rect::new(305.0, 147.0, 126.0, 83.0),
            ZoneId::new("computer-lab"),
            config.transition.vertical_band,
            config.transition.hold_frames,
        );
        let mut h = Harness::new();
        h.controller = GameSessionController::new(
            Rect::new(0.0, 0.0, 1080.0, 890.0),
            Position::new(360.0, 300.0),
            Vec::new(),
            ZoneTransitionController::new().with_structure(trigger),
            &config,
        );

        h.input.press(Direction::Up);
        let mut switch = None;
        for _ in 0..200 {
            let (s, _) = h.tick();
            if s.is_some() {
                switch = s;
                break;
            }
        }
        assert_eq!(switch, Some(ZoneId::new("computer-lab")));
        // The wall held the player at the doorway for the whole hold.
        assert!(h.controller.player().position.y > 188.0);
    }

    #[test]
    fn hover_affordance_follows_range_predicate() {
        let mut h = Harness::new();
        h.input.hover(Some(kev()));
        let (_, effects) = h.tick();
        assert!(effects
            .commands()
            .iter()
            .any(|c| matches!(c, EngineCommand::ShowAffordance { .. })));

        // Hover off: affordance hides.
        h.input.hover(None);
        let (_, effects) = h.tick();
        assert!(effects
            .commands()
            .iter()
            .any(|c| matches!(c, EngineCommand::HideAffordance { .. })));
    }
}
