use crate::action::{Action, RestAction};
use crate::state::{Actor, World};

use super::{Behavior, BehaviorKind};

/// Rests until fully healed or until the turn allowance runs out.
#[derive(Debug)]
pub struct RestBehavior {
    turns_left: u32,
    stopped: bool,
}

impl RestBehavior {
    pub fn new(max_turns: u32) -> Self {
        Self {
            turns_left: max_turns,
            stopped: false,
        }
    }

    pub fn turns_left(&self) -> u32 {
        self.turns_left
    }
}

impl Behavior for RestBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Rest
    }

    fn needs_user_input(&self) -> bool {
        self.stopped
    }

    fn next_action(&mut self, actor: &Actor, _world: &World) -> Option<Box<dyn Action>> {
        if self.turns_left == 0 || actor.health.is_full() {
            self.stopped = true;
        }
        if self.stopped {
            return None;
        }
        self.turns_left -= 1;
        Some(Box::new(RestAction::new(actor.id).check_for_cancel()))
    }

    fn disturb(&mut self) {
        self.stopped = true;
    }

    fn cancel(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::with_player;
    use crate::state::{EntityId, Position};

    #[test]
    fn resting_ends_when_healed_or_out_of_turns() {
        let mut world = with_player(&["."], Position::ORIGIN);
        world.actor_mut(EntityId::PLAYER).unwrap().take_damage(2);

        let mut rest = RestBehavior::new(2);
        assert!(rest.next_action(world.player().unwrap(), &world).is_some());
        assert!(rest.next_action(world.player().unwrap(), &world).is_some());
        assert!(rest.next_action(world.player().unwrap(), &world).is_none());
        assert!(rest.needs_user_input());

        world.actor_mut(EntityId::PLAYER).unwrap().heal(2);
        let mut rest = RestBehavior::new(10);
        assert!(rest.next_action(world.player().unwrap(), &world).is_none());
        assert_eq!(rest.turns_left(), 10);
    }

    #[test]
    fn disturbance_interrupts_rest() {
        let mut world = with_player(&["."], Position::ORIGIN);
        world.actor_mut(EntityId::PLAYER).unwrap().take_damage(2);
        let mut rest = RestBehavior::new(5);
        rest.disturb();
        assert!(rest.next_action(world.player().unwrap(), &world).is_none());
    }
}
