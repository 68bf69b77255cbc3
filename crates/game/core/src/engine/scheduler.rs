//! Energy-driven turn scheduling.
//!
//! The scheduler walks the actor registry by index. Each actor acts for as
//! long as it has energy; when every actor is exhausted the item clock runs,
//! and then a tick boundary grants everyone one gain of energy.
//!
//! The scheduler is an explicit cursor rather than a loop so the host can
//! pump it one decision at a time. Its only suspension point is an actor
//! whose behavior needs user input: the cursor stays put until the host
//! supplies an action.

use crate::action::{BurnAction, ConditionAction};
use crate::config::SimConfig;
use crate::energy::{Energy, Speed};
use crate::error::SimError;
use crate::state::{ItemTick, World};

use super::{ActionResolver, GameResult};

/// Where an actor is within its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Ask the behavior for the next action.
    Choose,
    /// The chosen action resolved; timed conditions come next.
    AfterAction,
}

/// Resumable position of the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Actors { index: usize, stage: Stage },
    Items,
    TickBoundary,
}

impl Cursor {
    const START: Self = Self::Actors {
        index: 0,
        stage: Stage::Choose,
    };
}

#[derive(Debug)]
pub struct TurnScheduler {
    cursor: Cursor,
    item_energy: Energy,
    item_speed: Speed,
}

impl TurnScheduler {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            cursor: Cursor::START,
            item_energy: Energy::default(),
            item_speed: config.item_speed,
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Makes one scheduling decision. Any action chosen is queued on
    /// `resolver`, which must be idle when this is called.
    pub fn advance(
        &mut self,
        world: &mut World,
        resolver: &mut ActionResolver,
    ) -> Result<GameResult, SimError> {
        debug_assert!(resolver.is_idle());
        tracing::trace!(cursor = ?self.cursor, turn = world.turn(), "scheduler advance");

        match self.cursor {
            Cursor::Actors { index, stage } => match stage {
                Stage::Choose => self.choose(world, resolver, index),
                Stage::AfterAction => {
                    self.queue_conditions(world, resolver, index);
                    self.cursor = Cursor::Actors {
                        index,
                        stage: Stage::Choose,
                    };
                    Ok(GameResult::CONTINUE)
                }
            },
            Cursor::Items => {
                if self.item_energy.has_energy() {
                    self.item_energy.spend();
                    for item in world.items() {
                        if let Some(ItemTick::Burning { .. }) = item.tick {
                            resolver.enqueue_free(Box::new(BurnAction::new(item.handle)));
                        }
                    }
                } else {
                    self.cursor = Cursor::TickBoundary;
                }
                Ok(GameResult::CONTINUE)
            }
            Cursor::TickBoundary => {
                for actor in world.actors_mut().iter_mut() {
                    if actor.is_alive() {
                        let speed = actor.speed;
                        actor.energy.gain(speed);
                    }
                }
                self.item_energy.gain(self.item_speed);
                world.advance_turn();
                self.cursor = Cursor::START;
                Ok(GameResult::CONTINUE)
            }
        }
    }

    fn choose(
        &mut self,
        world: &mut World,
        resolver: &mut ActionResolver,
        index: usize,
    ) -> Result<GameResult, SimError> {
        let turn = world.turn();
        let Some(actor) = world.actors().get_index(index) else {
            self.cursor = Cursor::Items;
            return Ok(GameResult::CONTINUE);
        };
        let id = actor.id;

        if (!actor.is_alive() && !actor.is_player()) || !actor.energy.has_energy() {
            self.end_actor_turn(world, index);
            return Ok(GameResult::CONTINUE);
        }

        let behavior = actor
            .behavior()
            .ok_or_else(|| SimError::missing_behavior(id, turn))?;
        if behavior.needs_user_input() {
            return Ok(GameResult::needs_user_input(id));
        }

        let mut behavior = world
            .actor_mut(id)
            .and_then(|actor| actor.take_behavior())
            .ok_or_else(|| SimError::missing_behavior(id, turn))?;
        let action = match world.actor(id) {
            Some(actor) => behavior.next_action(actor, world),
            None => None,
        };
        let kind = behavior.kind();
        let needs_input = behavior.needs_user_input();
        if let Some(actor) = world.actor_mut(id) {
            actor.restore_behavior(behavior);
        }

        match action {
            Some(action) => {
                tracing::debug!(actor = %id, action = action.name(), "action chosen");
                resolver.enqueue(action);
                self.cursor = Cursor::Actors {
                    index,
                    stage: Stage::AfterAction,
                };
                Ok(GameResult::CONTINUE)
            }
            None if needs_input => Ok(GameResult::needs_user_input(id)),
            None => Err(SimError::no_action(id, kind, turn)),
        }
    }

    fn queue_conditions(&self, world: &World, resolver: &mut ActionResolver, index: usize) {
        let Some(actor) = world.actors().get_index(index) else {
            return;
        };
        if !actor.is_alive() {
            return;
        }
        for kind in actor.conditions.kinds() {
            resolver.enqueue_free(Box::new(ConditionAction::new(actor.id, kind)));
        }
    }

    /// Compacts the registry and moves the cursor to the actor after
    /// `index`, accounting for slots removed at or before it.
    fn end_actor_turn(&mut self, world: &mut World, index: usize) {
        let removed = world.actors_mut().compact();
        let shift = removed.iter().filter(|&&slot| slot <= index).count();
        if !removed.is_empty() {
            tracing::trace!(removed = removed.len(), "registry compacted");
        }
        self.cursor = Cursor::Actors {
            index: index + 1 - shift,
            stage: Stage::Choose,
        };
    }
}
