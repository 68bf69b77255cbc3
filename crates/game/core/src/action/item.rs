use crate::state::{EntityId, ItemHandle, ItemLocation, ItemTick};

use super::{Action, ActionContext, ActionResult, Effect, live_actor};

/// Picks an item up from the actor's tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickUpAction {
    actor: EntityId,
    item: ItemHandle,
}

impl PickUpAction {
    pub fn new(actor: EntityId, item: ItemHandle) -> Self {
        Self { actor, item }
    }
}

impl Action for PickUpAction {
    fn name(&self) -> &'static str {
        "pick_up"
    }

    fn actor(&self) -> Option<EntityId> {
        Some(self.actor)
    }

    fn process(&mut self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(position) = live_actor(ctx.world, self.actor).map(|actor| actor.position) else {
            return ActionResult::failure();
        };
        let Some(item) = ctx.world.item_mut(self.item) else {
            return ActionResult::failure();
        };
        if !item.is_on_floor_at(position) {
            return ActionResult::failure();
        }

        item.location = ItemLocation::Carried(self.actor);
        ctx.effects.push(Effect::PickedUp {
            actor: self.actor,
            item: self.item,
        });
        ActionResult::success()
    }
}

/// One item-clock tick of a burning light source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurnAction {
    item: ItemHandle,
}

impl BurnAction {
    pub fn new(item: ItemHandle) -> Self {
        Self { item }
    }
}

impl Action for BurnAction {
    fn name(&self) -> &'static str {
        "burn"
    }

    fn actor(&self) -> Option<EntityId> {
        None
    }

    fn process(&mut self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(item) = ctx.world.item_mut(self.item) else {
            return ActionResult::failure();
        };
        let Some(ItemTick::Burning { fuel }) = item.tick.as_mut() else {
            return ActionResult::failure();
        };

        *fuel = fuel.saturating_sub(1);
        if *fuel == 0 {
            item.tick = None;
            tracing::debug!(item = item.handle.0, name = %item.name, "light went out");
            ctx.effects.push(Effect::LightOut { item: self.item });
        }
        ActionResult::success()
    }
}
