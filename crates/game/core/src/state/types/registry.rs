//! Live actor registry.
//!
//! Actors live in a dense vector iterated by index. Killing an actor only
//! flags it; dead non-player actors are removed in one [`compact`] pass at a
//! point the scheduler chooses, so indices never shift under an active
//! iteration.
//!
//! [`compact`]: ActorRegistry::compact

use crate::state::StateError;

use super::{Actor, EntityId, Position};

#[derive(Debug, Default)]
pub struct ActorRegistry {
    actors: Vec<Actor>,
    /// Sequential id allocator. Never reused; 0 is reserved for the player.
    next_id: u32,
}

impl ActorRegistry {
    pub fn new() -> Self {
        Self {
            actors: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocates a fresh monster id.
    pub fn allocate_id(&mut self) -> Result<EntityId, StateError> {
        if self.next_id == EntityId::PLAYER.0 {
            self.next_id = 1;
        }
        let id = EntityId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(StateError::EntityIdOverflow {
                current: self.next_id,
            })?;
        Ok(id)
    }

    /// Registers an actor. Ids must be unique.
    pub fn insert(&mut self, actor: Actor) -> Result<EntityId, StateError> {
        if self.get(actor.id).is_some() {
            return Err(StateError::DuplicateActor { actor: actor.id });
        }
        if actor.id.0 >= self.next_id {
            self.next_id = actor.id.0.saturating_add(1);
        }
        let id = actor.id;
        self.actors.push(actor);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    pub fn get_index(&self, index: usize) -> Option<&Actor> {
        self.actors.get(index)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Actor> {
        self.actors.get_mut(index)
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.actors.iter().position(|actor| actor.id == id)
    }

    /// The live actor standing on `position`, if any.
    pub fn at(&self, position: Position) -> Option<&Actor> {
        self.actors
            .iter()
            .find(|actor| actor.is_alive() && actor.position == position)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.get(EntityId::PLAYER)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.get_mut(EntityId::PLAYER)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Actor> {
        self.actors.iter_mut()
    }

    /// Number of dead actors waiting for the next compaction.
    pub fn pending_removals(&self) -> usize {
        self.actors
            .iter()
            .filter(|actor| !actor.is_alive() && !actor.is_player())
            .count()
    }

    /// Removes every dead non-player actor in a single pass.
    ///
    /// Returns the pre-compaction indices of the removed actors in ascending
    /// order so callers iterating by index can re-anchor their cursor. The
    /// player is never removed, alive or not.
    pub fn compact(&mut self) -> Vec<usize> {
        let mut removed = Vec::new();
        let mut index = 0;
        self.actors.retain(|actor| {
            let keep = actor.is_alive() || actor.is_player();
            if !keep {
                removed.push(index);
            }
            index += 1;
            keep
        });
        removed
    }
}
