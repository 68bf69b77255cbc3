//! Action domain.
//!
//! An [`Action`] is a single command tied to one actor (or, for passive item
//! ticks, to no actor at all). Actions are created fresh for every attempt
//! and processed by the resolver, which may:
//!
//! - accept the result as terminal (`done`), successful or not,
//! - re-process a substitute action named as the result's `alternate`,
//! - keep the action at the head of the queue when it is not done,
//! - run further sub-actions the action queued behind itself.
//!
//! # Module Structure
//!
//! - `result`: [`ActionResult`] and its constructors
//! - `queue`: the per-turn [`ActionQueue`]
//! - `effect`: [`Effect`] events and the [`EffectSink`]
//! - `movement`, `combat`, `wait`, `item`, `condition`: built-in actions

pub mod combat;
pub mod condition;
pub mod effect;
pub mod item;
pub mod movement;
pub mod queue;
pub mod result;
pub mod wait;

pub use combat::AttackAction;
pub use condition::ConditionAction;
pub use effect::{Effect, EffectSink};
pub use item::{BurnAction, PickUpAction};
pub use movement::{Direction, OpenDoorAction, WalkAction};
pub use queue::{ActionQueue, QueuedAction};
pub use result::ActionResult;
pub use wait::RestAction;

use std::fmt;

use crate::state::{EntityId, World};

/// Defines how a concrete action mutates the world.
pub trait Action: fmt::Debug {
    /// Short static name used in logs and errors.
    fn name(&self) -> &'static str;

    /// The actor performing this action, or `None` for world-driven actions.
    fn actor(&self) -> Option<EntityId>;

    /// Attempts the action. Must not panic on ordinary failures: a blocked
    /// move or a missing target is `ActionResult::failure()`.
    fn process(&mut self, ctx: &mut ActionContext<'_>) -> ActionResult;

    /// Post-commit hook. Runs on the action that was queued, after the whole
    /// alternate chain resolved successfully; `result` is the chain's final
    /// result.
    fn after_success(&mut self, _ctx: &mut ActionContext<'_>, _result: &ActionResult) {}
}

/// Everything an action may touch while it is being processed.
pub struct ActionContext<'a> {
    pub world: &'a mut World,
    pub effects: &'a mut EffectSink,
    queue: &'a mut ActionQueue,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        world: &'a mut World,
        effects: &'a mut EffectSink,
        queue: &'a mut ActionQueue,
    ) -> Self {
        Self {
            world,
            effects,
            queue,
        }
    }

    /// Appends a follow-up action behind the rest of the queue. Sub-actions
    /// never consume energy.
    pub fn queue_sub_action(&mut self, action: Box<dyn Action>) {
        tracing::trace!(action = action.name(), "sub-action queued");
        self.queue.push(QueuedAction::free(action));
    }

    /// Applies damage and records the matching effects.
    pub fn damage(&mut self, target: EntityId, amount: u32) -> bool {
        let Some(outcome) = self.world.damage(target, amount) else {
            return false;
        };
        self.effects.push(Effect::Damage {
            target,
            position: outcome.position,
            amount,
        });
        if outcome.killed {
            self.effects.push(Effect::Death {
                actor: target,
                position: outcome.position,
            });
        }
        outcome.killed
    }
}

/// Returns the acting actor's id if it is still alive.
pub(crate) fn live_actor(world: &World, actor: EntityId) -> Option<&crate::state::Actor> {
    world.actor(actor).filter(|a| a.is_alive())
}
