use crate::env::RngSource;
use crate::state::EntityId;

use super::{Action, ActionContext, ActionResult, live_actor};

/// Melee attack against an adjacent actor.
///
/// Damage is the attacker's base attack plus a variance roll of
/// `0..=attack/2`. The defender is disturbed whether or not it survives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackAction {
    attacker: EntityId,
    defender: EntityId,
}

impl AttackAction {
    pub fn new(attacker: EntityId, defender: EntityId) -> Self {
        Self { attacker, defender }
    }

    pub fn defender(&self) -> EntityId {
        self.defender
    }

    /// One use of the attacker's weapon. Bare hands never wear.
    pub(crate) fn wear_weapon(ctx: &mut ActionContext<'_>, attacker: EntityId) {
        let Some(actor) = ctx.world.actor_mut(attacker) else {
            return;
        };
        if let Some(durability) = actor.weapon_durability.as_mut() {
            *durability = durability.saturating_sub(1);
            if *durability == 0 {
                tracing::debug!(actor = %attacker, "weapon broke");
                actor.weapon_durability = None;
            }
        }
    }
}

impl Action for AttackAction {
    fn name(&self) -> &'static str {
        "attack"
    }

    fn actor(&self) -> Option<EntityId> {
        Some(self.attacker)
    }

    fn process(&mut self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(attacker) = live_actor(ctx.world, self.attacker) else {
            return ActionResult::failure();
        };
        let attack = attacker.attack;
        let Some(defender) = live_actor(ctx.world, self.defender) else {
            return ActionResult::failure();
        };
        if self.attacker == self.defender || attacker.position.chebyshev(defender.position) > 1 {
            return ActionResult::failure();
        }

        let variance = ctx.world.rng().range(0, attack / 2);
        let amount = attack + variance;
        let killed = ctx.damage(self.defender, amount);
        tracing::debug!(
            attacker = %self.attacker,
            defender = %self.defender,
            amount,
            killed,
            "attack landed"
        );

        if !killed
            && let Some(behavior) = ctx
                .world
                .actor_mut(self.defender)
                .and_then(|defender| defender.behavior_mut())
        {
            behavior.disturb();
        }

        ActionResult::success()
            .with_target(self.defender)
            .with_pause()
    }

    fn after_success(&mut self, ctx: &mut ActionContext<'_>, _result: &ActionResult) {
        Self::wear_weapon(ctx, self.attacker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::{add_monster, run, with_player};
    use crate::action::{Effect, EffectSink};
    use crate::state::Position;

    #[test]
    fn damage_stays_within_variance() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        let goblin = add_monster(&mut world, Position::new(1, 0), 1000);
        let mut effects = EffectSink::new();

        for _ in 0..20 {
            effects.clear();
            let mut attack = AttackAction::new(EntityId::PLAYER, goblin);
            let (result, _) = run(&mut world, &mut effects, &mut attack);
            assert!(result.success && result.needs_pause);
            let Some(Effect::Damage { amount, .. }) = effects.as_slice().first().copied() else {
                panic!("expected a damage effect, got {effects:?}");
            };
            // attack 3: 3 + 0..=1
            assert!((3..=4).contains(&amount));
        }
    }

    #[test]
    fn killing_blow_records_death() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        let goblin = add_monster(&mut world, Position::new(1, 0), 1);
        let mut effects = EffectSink::new();

        let mut attack = AttackAction::new(EntityId::PLAYER, goblin);
        let (result, _) = run(&mut world, &mut effects, &mut attack);
        assert!(result.success);
        assert!(!world.actor(goblin).unwrap().is_alive());
        assert!(matches!(effects.as_slice()[1], Effect::Death { actor, .. } if actor == goblin));
        assert!(world.actor_at(Position::new(1, 0)).is_none());
    }

    #[test]
    fn attacking_out_of_reach_fails() {
        let mut world = with_player(&["...."], Position::new(0, 0));
        let goblin = add_monster(&mut world, Position::new(3, 0), 5);
        let mut effects = EffectSink::new();

        let mut attack = AttackAction::new(EntityId::PLAYER, goblin);
        let (result, _) = run(&mut world, &mut effects, &mut attack);
        assert!(!result.success && result.done);
        assert!(effects.is_empty());
    }

    #[test]
    fn weapon_wears_and_breaks() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        world.actor_mut(EntityId::PLAYER).unwrap().weapon_durability = Some(2);
        let goblin = add_monster(&mut world, Position::new(1, 0), 1000);
        let mut effects = EffectSink::new();

        let mut attack = AttackAction::new(EntityId::PLAYER, goblin);
        run(&mut world, &mut effects, &mut attack);
        assert_eq!(world.player().unwrap().weapon_durability, Some(1));

        let mut attack = AttackAction::new(EntityId::PLAYER, goblin);
        run(&mut world, &mut effects, &mut attack);
        assert_eq!(world.player().unwrap().weapon_durability, None);
    }

    #[test]
    fn attack_wakes_the_defender() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        let goblin = add_monster(&mut world, Position::new(1, 0), 1000);
        let mut effects = EffectSink::new();

        assert!(!world.actor(goblin).unwrap().behavior().unwrap().is_awake());
        let mut attack = AttackAction::new(EntityId::PLAYER, goblin);
        run(&mut world, &mut effects, &mut attack);
        assert!(world.actor(goblin).unwrap().behavior().unwrap().is_awake());
    }
}
