//! Actor state.
//!
//! An actor pairs simulation data (position, health, energy, conditions,
//! timers) with the [`Behavior`] that decides what it does next. The behavior
//! is checked out of the actor while it is being consulted so it can read the
//! rest of the world without aliasing the actor itself.

use crate::behavior::{Behavior, MonsterBehavior, PlayerBehavior};
use crate::energy::{Energy, Speed, Timers};

use super::{Conditions, EntityId, Position, ResourceMeter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActorKind {
    Player,
    Monster,
}

/// A creature in the dungeon.
///
/// # Invariants
///
/// - `alive` is false exactly when the actor has been killed; dead monsters
///   stay registered until the scheduler compacts the registry.
/// - `behavior` is `Some` except while the scheduler is consulting it.
#[derive(Debug)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub kind: ActorKind,
    pub position: Position,
    pub speed: Speed,
    pub energy: Energy,
    pub health: ResourceMeter,
    /// Base damage dealt per hit.
    pub attack: u32,
    /// Remaining weapon uses; `None` fights bare-handed and never wears out.
    pub weapon_durability: Option<u32>,
    pub conditions: Conditions,
    pub timers: Timers,
    behavior: Option<Box<dyn Behavior>>,
    alive: bool,
}

impl Actor {
    fn with_parts(
        id: EntityId,
        name: impl Into<String>,
        kind: ActorKind,
        position: Position,
        speed: Speed,
        max_health: u32,
        attack: u32,
        behavior: Box<dyn Behavior>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            position,
            speed,
            energy: Energy::default(),
            health: ResourceMeter::full(max_health),
            attack,
            weapon_durability: None,
            conditions: Conditions::new(),
            timers: Timers::new(),
            behavior: Some(behavior),
            alive: true,
        }
    }

    /// Creates the player character, gated on host input.
    pub fn player(position: Position, speed: Speed, max_health: u32, attack: u32) -> Self {
        Self::with_parts(
            EntityId::PLAYER,
            "player",
            ActorKind::Player,
            position,
            speed,
            max_health,
            attack,
            Box::new(PlayerBehavior::new()),
        )
    }

    /// Creates a monster driven by [`MonsterBehavior`].
    pub fn monster(
        id: EntityId,
        name: impl Into<String>,
        position: Position,
        speed: Speed,
        max_health: u32,
        attack: u32,
    ) -> Self {
        Self::with_parts(
            id,
            name,
            ActorKind::Monster,
            position,
            speed,
            max_health,
            attack,
            Box::new(MonsterBehavior::new()),
        )
    }

    pub fn with_behavior(mut self, behavior: Box<dyn Behavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn with_energy(mut self, energy: Energy) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_weapon(mut self, durability: u32) -> Self {
        self.weapon_durability = Some(durability);
        self
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn behavior(&self) -> Option<&dyn Behavior> {
        self.behavior.as_deref()
    }

    pub fn behavior_mut(&mut self) -> Option<&mut (dyn Behavior + 'static)> {
        self.behavior.as_deref_mut()
    }

    /// Replaces the behavior, returning the previous one.
    pub fn set_behavior(&mut self, behavior: Box<dyn Behavior>) -> Option<Box<dyn Behavior>> {
        self.behavior.replace(behavior)
    }

    pub(crate) fn take_behavior(&mut self) -> Option<Box<dyn Behavior>> {
        self.behavior.take()
    }

    pub(crate) fn restore_behavior(&mut self, behavior: Box<dyn Behavior>) {
        // A behavior installed while the old one was checked out wins.
        if self.behavior.is_none() {
            self.behavior = Some(behavior);
        }
    }

    /// Applies damage. Returns true if this blow killed the actor.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health.current = self.health.current.saturating_sub(amount);
        if self.health.is_empty() {
            self.alive = false;
            return true;
        }
        false
    }

    pub fn heal(&mut self, amount: u32) {
        if self.alive {
            self.health.current = (self.health.current + amount).min(self.health.maximum);
        }
    }

    /// Bookkeeping for a turn the actor actually takes: advances its timers.
    pub fn on_take_turn(&mut self) {
        let mut timers = std::mem::take(&mut self.timers);
        timers.tick(self);
        timers.absorb(std::mem::take(&mut self.timers));
        self.timers = timers;
    }

    /// Installs a repeating regeneration timer healing `amount` every `period` turns.
    pub fn with_regeneration(mut self, period: u32, amount: u32) -> Self {
        self.timers
            .add(period, true, Box::new(move |actor: &mut Actor| actor.heal(amount)));
        self
    }
}
