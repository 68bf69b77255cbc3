//! Action resolution state machine.
//!
//! Each call to [`ActionResolver::resolve_next`] takes the head of the
//! queue through one full dispatch:
//!
//! 1. clear the effect sink and enter the `act` span of the head's actor
//! 2. pay the actor's energy on first dispatch of an energy-consuming head
//! 3. process the head, then each alternate it names, up to the hop limit
//! 4. keep the head in front if not done; otherwise drop it
//! 5. run `after_success` on the queued action if the final result succeeded
//! 6. refresh the player's field of view
//! 7. turn the outcome into a [`GameResult`]

use crate::action::{Action, ActionContext, ActionQueue, EffectSink, QueuedAction};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::fov::{VisibilityField, VisibilityReport};
use crate::state::{EntityId, World};

use super::GameResult;

#[derive(Debug)]
pub struct ActionResolver {
    queue: ActionQueue,
    max_alternate_hops: usize,
    acting_actor: Option<EntityId>,
    cancel_eligible: Option<EntityId>,
    field: VisibilityField,
    last_visibility: Option<VisibilityReport>,
}

impl ActionResolver {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            queue: ActionQueue::new(),
            max_alternate_hops: config.max_alternate_hops,
            acting_actor: None,
            cancel_eligible: None,
            field: VisibilityField::new(config.fov_radius),
            last_visibility: None,
        }
    }

    /// Queues an action that pays for its actor's turn.
    pub fn enqueue(&mut self, action: Box<dyn Action>) {
        self.queue.push(QueuedAction::root(action));
    }

    /// Queues an action that costs no energy.
    pub fn enqueue_free(&mut self, action: Box<dyn Action>) {
        self.queue.push(QueuedAction::free(action));
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    /// Drops everything still queued.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.cancel_eligible = None;
    }

    /// Owner of the head currently being processed. Only set during
    /// processing, so hosts observe `None` between steps.
    pub fn acting_actor(&self) -> Option<EntityId> {
        self.acting_actor
    }

    pub fn cancel_eligible(&self) -> Option<EntityId> {
        self.cancel_eligible
    }

    /// Consumes the cancel eligibility; a second call returns `None`.
    pub(crate) fn take_cancel_eligible(&mut self) -> Option<EntityId> {
        self.cancel_eligible.take()
    }

    pub fn last_visibility(&self) -> Option<&VisibilityReport> {
        self.last_visibility.as_ref()
    }

    pub fn refresh_visibility(&mut self, world: &mut World) -> Result<(), SimError> {
        self.last_visibility = Some(self.field.refresh(world)?);
        Ok(())
    }

    /// Resolves the queue head. Returns `GameResult::CONTINUE` when the queue
    /// is empty or the head produced nothing the host needs to see.
    pub fn resolve_next(
        &mut self,
        world: &mut World,
        effects: &mut EffectSink,
    ) -> Result<GameResult, SimError> {
        let Some(mut entry) = self.queue.pop_front() else {
            return Ok(GameResult::CONTINUE);
        };

        effects.clear();
        self.cancel_eligible = None;
        let actor = entry.action.actor();
        let span = tracing::debug_span!("act", actor = actor.map(|id| id.0));
        let _guard = span.enter();

        let turn = world.turn();
        if let Some(id) = actor {
            let acting = world
                .actor_mut(id)
                .ok_or_else(|| SimError::actor_not_found(id, turn))?;
            if entry.consumes_energy && !entry.energy_spent {
                acting.energy.spend();
                acting.on_take_turn();
                entry.energy_spent = true;
            }
        }

        self.acting_actor = actor;
        let max_hops = self.max_alternate_hops;
        let mut ctx = ActionContext::new(world, effects, &mut self.queue);
        let mut result = entry.action.process(&mut ctx);
        let mut hops = 0;
        while let Some(mut alternate) = result.alternate.take() {
            hops += 1;
            if hops > max_hops {
                self.acting_actor = None;
                return Err(SimError::alternate_cascade(
                    entry.action.name(),
                    actor,
                    max_hops,
                    turn,
                ));
            }
            tracing::trace!(from = entry.action.name(), to = alternate.name(), "alternate");
            result = alternate.process(&mut ctx);
        }

        if result.success {
            entry.action.after_success(&mut ctx, &result);
        }
        tracing::debug!(
            action = entry.action.name(),
            success = result.success,
            done = result.done,
            hops,
            "action resolved"
        );

        if !result.done {
            self.queue.push_front(entry);
        }
        self.acting_actor = None;

        self.refresh_visibility(world)?;

        if result.needs_pause || !effects.is_empty() {
            Ok(GameResult::needs_pause())
        } else if result.needs_check_for_cancel {
            self.cancel_eligible = actor;
            Ok(GameResult::check_for_cancel(actor))
        } else {
            Ok(GameResult::CONTINUE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::{add_monster, with_player};
    use crate::action::{ActionResult, Direction, RestAction, WalkAction};
    use crate::energy::Energy;
    use crate::engine::GameFlags;
    use crate::state::Position;

    /// Needs `remaining` extra attempts before it is done.
    #[derive(Debug)]
    struct Slow {
        actor: EntityId,
        remaining: u32,
    }

    impl Action for Slow {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn actor(&self) -> Option<EntityId> {
            Some(self.actor)
        }

        fn process(&mut self, _ctx: &mut ActionContext<'_>) -> ActionResult {
            if self.remaining == 0 {
                return ActionResult::success();
            }
            self.remaining -= 1;
            ActionResult::not_done()
        }
    }

    /// Always redirects to another copy of itself.
    #[derive(Debug)]
    struct Loop(EntityId);

    impl Action for Loop {
        fn name(&self) -> &'static str {
            "loop"
        }

        fn actor(&self) -> Option<EntityId> {
            Some(self.0)
        }

        fn process(&mut self, _ctx: &mut ActionContext<'_>) -> ActionResult {
            ActionResult::alternate(Box::new(Loop(self.0)))
        }
    }

    fn resolver() -> ActionResolver {
        ActionResolver::new(&SimConfig::default())
    }

    #[test]
    fn energy_is_spent_once_across_retries() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        world.actor_mut(EntityId::PLAYER).unwrap().energy = Energy::new(120);
        let mut effects = EffectSink::new();
        let mut resolver = resolver();

        resolver.enqueue(Box::new(Slow {
            actor: EntityId::PLAYER,
            remaining: 2,
        }));
        for _ in 0..3 {
            assert!(!resolver.is_idle());
            resolver.resolve_next(&mut world, &mut effects).unwrap();
        }
        assert!(resolver.is_idle());
        assert_eq!(world.player().unwrap().energy.amount(), 60);
    }

    #[test]
    fn not_done_head_is_retried_before_later_entries() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut resolver = resolver();

        resolver.enqueue(Box::new(Slow {
            actor: EntityId::PLAYER,
            remaining: 1,
        }));
        resolver.enqueue_free(Box::new(RestAction::new(EntityId::PLAYER)));

        resolver.resolve_next(&mut world, &mut effects).unwrap();
        assert_eq!(resolver.queue().front().map(|e| e.action.name()), Some("slow"));
        assert_eq!(resolver.queue().len(), 2);
    }

    #[test]
    fn endless_alternates_are_fatal() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut resolver = resolver();

        resolver.enqueue(Box::new(Loop(EntityId::PLAYER)));
        let err = resolver.resolve_next(&mut world, &mut effects).unwrap_err();
        assert!(matches!(err, SimError::AlternateCascade { max_hops: 8, .. }));
        assert_eq!(resolver.acting_actor(), None);
    }

    #[test]
    fn alternate_outcome_is_attributed_to_its_target() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        world.actor_mut(EntityId::PLAYER).unwrap().weapon_durability = Some(5);
        let goblin = add_monster(&mut world, Position::new(1, 0), 100);
        let mut effects = EffectSink::new();
        let mut resolver = resolver();

        resolver.enqueue(Box::new(WalkAction::new(EntityId::PLAYER, Direction::East)));
        let result = resolver.resolve_next(&mut world, &mut effects).unwrap();

        assert_eq!(result.flags, GameFlags::NEEDS_PAUSE);
        assert!(
            effects
                .iter()
                .all(|e| matches!(e, crate::action::Effect::Damage { target, .. } if *target == goblin))
        );
        assert_eq!(world.player().unwrap().weapon_durability, Some(4));
        assert_eq!(world.player_position(), Some(Position::new(0, 0)));
    }

    #[test]
    fn check_for_cancel_marks_the_actor() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut resolver = resolver();

        resolver.enqueue(Box::new(
            WalkAction::new(EntityId::PLAYER, Direction::East).check_for_cancel(),
        ));
        let result = resolver.resolve_next(&mut world, &mut effects).unwrap();
        assert_eq!(result, GameResult::check_for_cancel(Some(EntityId::PLAYER)));
        assert_eq!(resolver.take_cancel_eligible(), Some(EntityId::PLAYER));
        assert_eq!(resolver.take_cancel_eligible(), None);
    }

    #[test]
    fn visibility_follows_the_player() {
        let mut world = with_player(&["....."], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut resolver = resolver();

        resolver.enqueue(Box::new(WalkAction::new(EntityId::PLAYER, Direction::East)));
        let result = resolver.resolve_next(&mut world, &mut effects).unwrap();
        assert!(result.is_continue());
        assert_eq!(
            resolver.last_visibility().map(|report| report.origin),
            Some(Position::new(1, 0))
        );
    }

    #[test]
    fn removed_actor_is_fatal() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut resolver = resolver();

        resolver.enqueue(Box::new(RestAction::new(EntityId(42))));
        let err = resolver.resolve_next(&mut world, &mut effects).unwrap_err();
        assert!(matches!(err, SimError::ActorNotFound { .. }));
    }
}
