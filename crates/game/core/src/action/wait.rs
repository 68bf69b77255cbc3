use crate::state::EntityId;

use super::{Action, ActionContext, ActionResult, live_actor};

/// Rest action - the actor passes its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestAction {
    pub actor: EntityId,
    check_for_cancel: bool,
}

impl RestAction {
    pub fn new(actor: EntityId) -> Self {
        Self {
            actor,
            check_for_cancel: false,
        }
    }

    pub fn check_for_cancel(mut self) -> Self {
        self.check_for_cancel = true;
        self
    }
}

impl Action for RestAction {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn actor(&self) -> Option<EntityId> {
        Some(self.actor)
    }

    fn process(&mut self, ctx: &mut ActionContext<'_>) -> ActionResult {
        if live_actor(ctx.world, self.actor).is_none() {
            return ActionResult::failure();
        }
        if self.check_for_cancel {
            ActionResult::success().with_check_for_cancel()
        } else {
            ActionResult::success()
        }
    }
}
