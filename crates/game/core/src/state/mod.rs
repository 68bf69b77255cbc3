//! Authoritative world state.
//!
//! This module owns the tile grid, the live actor registry, floor and carried
//! items, the seeded random source and the latched play status. Actions
//! mutate it through the methods here while they are being resolved; nothing
//! else holds a reference to it during a simulation step.
pub mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    Actor, ActorKind, ActorRegistry, Condition, ConditionKind, Conditions, EntityId, ItemHandle,
    ItemLocation, ItemState, ItemTick, Position, Rect, ResourceMeter, Tile, TileGrid,
};

use crate::env::PcgRng;

/// Whether the simulation is still running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WorldStatus {
    #[default]
    Playing,
    /// Terminal and latched: once reached it never reverts.
    GameOver,
}

/// Result of applying damage to an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    pub target: EntityId,
    pub position: Position,
    pub amount: u32,
    pub killed: bool,
}

/// The dungeon: grid, actors, items and shared simulation bookkeeping.
#[derive(Debug)]
pub struct World {
    grid: TileGrid,
    actors: ActorRegistry,
    items: Vec<ItemState>,
    next_item: u32,
    rng: PcgRng,
    status: WorldStatus,
    /// Tick boundaries crossed since the world was created.
    turn: u64,
}

impl World {
    pub fn new(grid: TileGrid, seed: u64) -> Self {
        Self {
            grid,
            actors: ActorRegistry::new(),
            items: Vec::new(),
            next_item: 0,
            rng: PcgRng::new(seed),
            status: WorldStatus::Playing,
            turn: 0,
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn actors(&self) -> &ActorRegistry {
        &self.actors
    }

    pub fn actors_mut(&mut self) -> &mut ActorRegistry {
        &mut self.actors
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    /// The live actor standing on `position`, if any.
    pub fn actor_at(&self, position: Position) -> Option<&Actor> {
        self.actors.at(position)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actors.player()
    }

    pub fn player_position(&self) -> Option<Position> {
        self.player().map(|player| player.position)
    }

    pub fn rng(&mut self) -> &mut PcgRng {
        &mut self.rng
    }

    pub fn status(&self) -> WorldStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == WorldStatus::GameOver
    }

    /// Latches the terminal state.
    pub fn end_game(&mut self) {
        if self.status != WorldStatus::GameOver {
            tracing::info!(turn = self.turn, "game over");
        }
        self.status = WorldStatus::GameOver;
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub(crate) fn advance_turn(&mut self) {
        self.turn += 1;
    }

    pub fn allocate_id(&mut self) -> Result<EntityId, StateError> {
        self.actors.allocate_id()
    }

    /// Registers an actor, randomizing the starting energy of non-player
    /// actors so that actors spawned together do not act in lockstep.
    pub fn spawn(&mut self, mut actor: Actor) -> Result<EntityId, StateError> {
        if !actor.is_player() {
            let speed = actor.speed;
            actor.energy.randomize(speed, &mut self.rng);
        }
        self.place(actor)
    }

    /// Registers an actor exactly as given (no energy randomization).
    pub fn place(&mut self, actor: Actor) -> Result<EntityId, StateError> {
        let position = actor.position;
        if !self.grid.contains(position) {
            let dims = self.grid.dimensions();
            return Err(StateError::PositionOutOfBounds {
                position,
                map_width: dims.width,
                map_height: dims.height,
            });
        }
        if !self.grid.is_passable(position) {
            return Err(StateError::Impassable { position });
        }
        if let Some(occupant) = self.actor_at(position) {
            return Err(StateError::PositionOccupied {
                position,
                occupant: occupant.id,
            });
        }
        if actor.is_player() != actor.id.is_player() {
            return Err(StateError::PlayerMismatch { actor: actor.id });
        }
        tracing::debug!(actor = %actor.id, name = %actor.name, %position, "actor placed");
        self.actors.insert(actor)
    }

    pub fn add_item(
        &mut self,
        name: impl Into<String>,
        location: ItemLocation,
        tick: Option<ItemTick>,
    ) -> ItemHandle {
        let handle = ItemHandle(self.next_item);
        self.next_item += 1;
        let mut item = ItemState::new(handle, name, location);
        item.tick = tick;
        self.items.push(item);
        handle
    }

    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    pub fn item(&self, handle: ItemHandle) -> Option<&ItemState> {
        self.items.iter().find(|item| item.handle == handle)
    }

    pub fn item_mut(&mut self, handle: ItemHandle) -> Option<&mut ItemState> {
        self.items.iter_mut().find(|item| item.handle == handle)
    }

    pub fn items_at(&self, position: Position) -> impl Iterator<Item = &ItemState> {
        self.items
            .iter()
            .filter(move |item| item.is_on_floor_at(position))
    }

    /// Passable and not occupied by a live actor.
    pub fn is_walkable(&self, position: Position) -> bool {
        self.grid.is_passable(position) && self.actor_at(position).is_none()
    }

    /// Moves an actor without any rule checks. Returns false if the actor is
    /// not registered.
    pub fn move_actor(&mut self, id: EntityId, to: Position) -> bool {
        match self.actors.get_mut(id) {
            Some(actor) => {
                actor.position = to;
                true
            }
            None => false,
        }
    }

    /// Applies damage to a live actor. Killing the player ends the game;
    /// killed monsters stay registered until the next compaction.
    pub fn damage(&mut self, target: EntityId, amount: u32) -> Option<DamageOutcome> {
        let actor = self.actors.get_mut(target)?;
        if !actor.is_alive() {
            return None;
        }
        let killed = actor.take_damage(amount);
        let outcome = DamageOutcome {
            target,
            position: actor.position,
            amount,
            killed,
        };
        if killed {
            tracing::debug!(actor = %target, "actor killed");
            if target.is_player() {
                self.end_game();
            }
        }
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::Speed;

    fn world() -> World {
        let grid = TileGrid::from_ascii(["#####", "#...#", "#####"], true).unwrap();
        World::new(grid, 1)
    }

    #[test]
    fn placement_is_validated() {
        let mut world = world();
        world
            .place(Actor::player(Position::new(1, 1), Speed::NORMAL, 10, 2))
            .unwrap();

        let id = world.allocate_id().unwrap();
        let on_wall = Actor::monster(id, "rat", Position::new(0, 0), Speed::NORMAL, 3, 1);
        assert!(matches!(world.place(on_wall), Err(StateError::Impassable { .. })));

        let on_player = Actor::monster(id, "rat", Position::new(1, 1), Speed::NORMAL, 3, 1);
        assert!(matches!(
            world.place(on_player),
            Err(StateError::PositionOccupied { .. })
        ));

        let outside = Actor::monster(id, "rat", Position::new(9, 9), Speed::NORMAL, 3, 1);
        assert!(matches!(
            world.place(outside),
            Err(StateError::PositionOutOfBounds { .. })
        ));
    }

    #[test]
    fn spawn_randomizes_monster_energy_deterministically() {
        let spawn_energies = |seed| {
            let mut world = World::new(
                TileGrid::from_ascii(["......"], true).unwrap(),
                seed,
            );
            (0..5)
                .map(|x| {
                    let id = world.allocate_id().unwrap();
                    world
                        .spawn(Actor::monster(id, "rat", Position::new(x, 0), Speed::NORMAL, 3, 1))
                        .unwrap();
                    world.actor(id).unwrap().energy.amount()
                })
                .collect::<Vec<_>>()
        };

        let first = spawn_energies(99);
        assert_eq!(first, spawn_energies(99));
        assert!(first.iter().all(|energy| *energy < Speed::NORMAL.gain()));
    }

    #[test]
    fn killing_the_player_latches_game_over() {
        let mut world = world();
        world
            .place(Actor::player(Position::new(1, 1), Speed::NORMAL, 3, 2))
            .unwrap();

        let outcome = world.damage(EntityId::PLAYER, 5).unwrap();
        assert!(outcome.killed);
        assert!(world.is_game_over());
        assert!(world.damage(EntityId::PLAYER, 1).is_none());
        assert!(world.player().is_some());
    }

    #[test]
    fn items_are_found_by_floor_position() {
        let mut world = world();
        let torch = world.add_item(
            "torch",
            ItemLocation::Floor(Position::new(2, 1)),
            Some(ItemTick::Burning { fuel: 3 }),
        );
        assert_eq!(
            world.items_at(Position::new(2, 1)).map(|i| i.handle).collect::<Vec<_>>(),
            vec![torch]
        );
        assert_eq!(world.items_at(Position::new(3, 1)).count(), 0);
    }
}
