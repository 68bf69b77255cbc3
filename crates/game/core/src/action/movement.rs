use crate::env::TerrainKind;
use crate::state::{EntityId, Position};

use super::{
    Action, ActionContext, ActionResult, AttackAction, Effect, PickUpAction, live_actor,
};

/// The eight king-move directions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Unit offset; north is negative y.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    /// Direction for a delta whose components are in `-1..=1`, not both zero.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Some(match (dx, dy) {
            (0, -1) => Self::North,
            (1, -1) => Self::NorthEast,
            (1, 0) => Self::East,
            (1, 1) => Self::SouthEast,
            (0, 1) => Self::South,
            (-1, 1) => Self::SouthWest,
            (-1, 0) => Self::West,
            (-1, -1) => Self::NorthWest,
            _ => return None,
        })
    }

    pub fn step(self, from: Position) -> Position {
        let (dx, dy) = self.delta();
        from.offset(dx, dy)
    }
}

/// Step one tile. Redirects to opening a door or attacking whatever stands
/// in the way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WalkAction {
    actor: EntityId,
    direction: Direction,
    check_for_cancel: bool,
}

impl WalkAction {
    pub fn new(actor: EntityId, direction: Direction) -> Self {
        Self {
            actor,
            direction,
            check_for_cancel: false,
        }
    }

    /// Ask the host whether to keep going after this step.
    pub fn check_for_cancel(mut self) -> Self {
        self.check_for_cancel = true;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Action for WalkAction {
    fn name(&self) -> &'static str {
        "walk"
    }

    fn actor(&self) -> Option<EntityId> {
        Some(self.actor)
    }

    fn process(&mut self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let Some(walker) = live_actor(ctx.world, self.actor) else {
            return ActionResult::failure();
        };
        let is_player = walker.is_player();
        let destination = self.direction.step(walker.position);

        if let Some(occupant) = ctx.world.actor_at(destination) {
            return ActionResult::alternate(Box::new(AttackAction::new(self.actor, occupant.id)));
        }

        let Some(tile) = ctx.world.grid().get(destination) else {
            return ActionResult::failure();
        };
        if tile.terrain() == TerrainKind::CLOSED_DOOR {
            return ActionResult::alternate(Box::new(OpenDoorAction::new(self.actor, destination)));
        }
        if !tile.is_passable() {
            return ActionResult::failure();
        }

        ctx.world.move_actor(self.actor, destination);

        if is_player {
            let items: Vec<_> = ctx
                .world
                .items_at(destination)
                .map(|item| item.handle)
                .collect();
            for item in items {
                ctx.queue_sub_action(Box::new(PickUpAction::new(self.actor, item)));
            }
        }

        let result = ActionResult::success();
        if self.check_for_cancel {
            result.with_check_for_cancel()
        } else {
            result
        }
    }

    /// Walking into an actor resolves as an attack; the weapon wears as if
    /// the attack had been queued directly.
    fn after_success(&mut self, ctx: &mut ActionContext<'_>, result: &ActionResult) {
        if result.target.is_some() {
            AttackAction::wear_weapon(ctx, self.actor);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenDoorAction {
    actor: EntityId,
    position: Position,
}

impl OpenDoorAction {
    pub fn new(actor: EntityId, position: Position) -> Self {
        Self { actor, position }
    }
}

impl Action for OpenDoorAction {
    fn name(&self) -> &'static str {
        "open_door"
    }

    fn actor(&self) -> Option<EntityId> {
        Some(self.actor)
    }

    fn process(&mut self, ctx: &mut ActionContext<'_>) -> ActionResult {
        let is_closed_door = ctx
            .world
            .grid()
            .get(self.position)
            .is_some_and(|tile| tile.terrain() == TerrainKind::CLOSED_DOOR);
        if !is_closed_door {
            return ActionResult::failure();
        }

        ctx.world
            .grid_mut()
            .set_terrain(self.position, TerrainKind::OPEN_DOOR);
        ctx.effects.push(Effect::DoorOpened {
            position: self.position,
        });
        ActionResult::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EffectSink;
    use crate::action::testing::{add_monster, run, with_player};
    use crate::state::ItemLocation;
    use strum::IntoEnumIterator;

    #[test]
    fn deltas_round_trip_through_from_delta() {
        for direction in Direction::iter() {
            let (dx, dy) = direction.delta();
            assert_eq!(Direction::from_delta(dx, dy), Some(direction));
        }
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn walking_moves_onto_floor() {
        let mut world = with_player(&["....."], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut walk = WalkAction::new(EntityId::PLAYER, Direction::East);

        let (result, queue) = run(&mut world, &mut effects, &mut walk);
        assert!(result.success && result.done);
        assert!(queue.is_empty());
        assert_eq!(world.player_position(), Some(Position::new(1, 0)));
        assert!(effects.is_empty());
    }

    #[test]
    fn walking_into_a_wall_fails_without_moving() {
        let mut world = with_player(&[".#"], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut walk = WalkAction::new(EntityId::PLAYER, Direction::East);

        let (result, _) = run(&mut world, &mut effects, &mut walk);
        assert!(!result.success && result.done);
        assert_eq!(world.player_position(), Some(Position::new(0, 0)));

        let mut off_map = WalkAction::new(EntityId::PLAYER, Direction::West);
        let (result, _) = run(&mut world, &mut effects, &mut off_map);
        assert!(!result.success && result.done);
    }

    #[test]
    fn walking_into_a_closed_door_opens_it() {
        let mut world = with_player(&[".+."], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut walk = WalkAction::new(EntityId::PLAYER, Direction::East);

        let mut queue = crate::action::ActionQueue::new();
        let mut ctx = ActionContext::new(&mut world, &mut effects, &mut queue);
        let first = walk.process(&mut ctx);
        assert!(first.is_alternate());
        assert!(!first.done);

        let (result, _) = run(&mut world, &mut effects, &mut walk);
        assert!(result.success);
        assert_eq!(
            world.grid().get(Position::new(1, 0)).map(|t| t.terrain()),
            Some(TerrainKind::OPEN_DOOR)
        );
        assert_eq!(world.player_position(), Some(Position::new(0, 0)));
        assert!(effects.iter().any(|e| matches!(e, Effect::DoorOpened { .. })));
    }

    #[test]
    fn walking_into_a_monster_attacks_it() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        let goblin = add_monster(&mut world, Position::new(1, 0), 20);
        let mut effects = EffectSink::new();
        let mut walk = WalkAction::new(EntityId::PLAYER, Direction::East);

        let (result, _) = run(&mut world, &mut effects, &mut walk);
        assert!(result.success);
        assert_eq!(result.target, Some(goblin));
        assert_eq!(world.player_position(), Some(Position::new(0, 0)));
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, Effect::Damage { target, .. } if *target == goblin))
        );
    }

    #[test]
    fn player_queues_pickups_for_items_underfoot() {
        let mut world = with_player(&["..."], Position::new(0, 0));
        world.add_item("coin", ItemLocation::Floor(Position::new(1, 0)), None);
        world.add_item("gem", ItemLocation::Floor(Position::new(1, 0)), None);
        let mut effects = EffectSink::new();
        let mut walk = WalkAction::new(EntityId::PLAYER, Direction::East);

        let (_, queue) = run(&mut world, &mut effects, &mut walk);
        assert_eq!(queue.len(), 2);
        assert!(queue.front().is_some_and(|entry| !entry.consumes_energy));
    }

    #[test]
    fn check_for_cancel_is_reported_on_success_only() {
        let mut world = with_player(&[".#", ".."], Position::new(0, 0));
        let mut effects = EffectSink::new();
        let mut blocked = WalkAction::new(EntityId::PLAYER, Direction::East).check_for_cancel();

        let (result, _) = run(&mut world, &mut effects, &mut blocked);
        assert!(!result.needs_check_for_cancel);

        let mut open = WalkAction::new(EntityId::PLAYER, Direction::South).check_for_cancel();
        let (result, _) = run(&mut world, &mut effects, &mut open);
        assert!(result.success && result.needs_check_for_cancel);
    }
}
