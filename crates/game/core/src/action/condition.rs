use crate::state::{ConditionKind, EntityId};

use super::{Action, ActionContext, ActionResult, Effect, live_actor};

/// Per-turn update of one timed condition on an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConditionAction {
    actor: EntityId,
    kind: ConditionKind,
}

impl ConditionAction {
    pub fn new(actor: EntityId, kind: ConditionKind) -> Self {
        Self { actor, kind }
    }
}

impl Action for ConditionAction {
    fn name(&self) -> &'static str {
        "condition"
    }

    fn actor(&self) -> Option<EntityId> {
        Some(self.actor)
    }

    fn process(&mut self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(condition) = live_actor(ctx.world, self.actor)
            .and_then(|actor| actor.conditions.get(self.kind).copied())
        else {
            return ActionResult::failure();
        };

        match condition.kind {
            ConditionKind::Poisoned => {
                ctx.damage(self.actor, condition.potency);
            }
            ConditionKind::Frozen => {
                if let Some(actor) = ctx.world.actor_mut(self.actor) {
                    actor.energy.drain();
                }
            }
        }

        let expired = ctx
            .world
            .actor_mut(self.actor)
            .and_then(|actor| actor.conditions.count_down(self.kind))
            .unwrap_or(false);
        if expired {
            ctx.effects.push(Effect::ConditionExpired {
                actor: self.actor,
                condition: self.kind,
            });
        }
        ActionResult::success()
    }
}
