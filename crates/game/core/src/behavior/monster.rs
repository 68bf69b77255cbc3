use crate::action::{Action, Direction, RestAction, WalkAction};
use crate::env::TerrainKind;
use crate::state::{Actor, Position, World};

use super::{Behavior, BehaviorKind};

/// Sleeps until the player can see it or it is disturbed, then closes in on
/// the player one greedy step at a time.
#[derive(Debug, Default)]
pub struct MonsterBehavior {
    awake: bool,
}

impl MonsterBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn awake() -> Self {
        Self { awake: true }
    }

    fn step_toward(actor: &Actor, world: &World, target: Position) -> Option<Direction> {
        let dx = (target.x - actor.position.x).signum();
        let dy = (target.y - actor.position.y).signum();
        [(dx, dy), (dx, 0), (0, dy)]
            .into_iter()
            .filter_map(|(dx, dy)| Direction::from_delta(dx, dy))
            .find(|direction| {
                let next = direction.step(actor.position);
                next == target
                    || world.is_walkable(next)
                    || (world.actor_at(next).is_none()
                        && world.grid().get(next).map(|tile| tile.terrain())
                            == Some(TerrainKind::CLOSED_DOOR))
            })
    }
}

impl Behavior for MonsterBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Monster
    }

    fn next_action(&mut self, actor: &Actor, world: &World) -> Option<Box<dyn Action>> {
        if !self.awake && world.grid().is_visible(actor.position) {
            tracing::debug!(actor = %actor.id, "monster noticed the player");
            self.awake = true;
        }

        let target = world
            .player()
            .filter(|player| player.is_alive())
            .map(|player| player.position);

        let direction = match target {
            Some(target) if self.awake => Self::step_toward(actor, world, target),
            _ => None,
        };

        let action: Box<dyn Action> = match direction {
            Some(direction) => Box::new(WalkAction::new(actor.id, direction)),
            None => Box::new(RestAction::new(actor.id)),
        };
        Some(action)
    }

    fn disturb(&mut self) {
        self.awake = true;
    }

    fn is_awake(&self) -> bool {
        self.awake
    }
}
