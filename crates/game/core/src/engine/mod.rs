//! Turn scheduling and action resolution.
//!
//! [`Game`] is the host-facing facade. It owns the [`World`] together with
//! the [`TurnScheduler`] and the [`ActionResolver`], and advances them one
//! decision per [`Game::step`]. Hosts usually call [`Game::process`], which
//! keeps stepping until something needs their attention.

mod resolver;
mod result;
mod scheduler;

pub use resolver::ActionResolver;
pub use result::{GameFlags, GameResult};
pub use scheduler::{Cursor, Stage, TurnScheduler};

use crate::action::{Action, EffectSink};
use crate::behavior::{Behavior, PlayerBehavior};
use crate::config::SimConfig;
use crate::error::{GameError, SimError};
use crate::fov::VisibilityReport;
use crate::state::{EntityId, World};

/// A running simulation.
///
/// After any `Err` from [`step`](Self::step) or [`process`](Self::process)
/// the session is corrupt and must not be pumped again.
#[derive(Debug)]
pub struct Game {
    world: World,
    config: SimConfig,
    scheduler: TurnScheduler,
    resolver: ActionResolver,
    effects: EffectSink,
}

impl Game {
    /// Wraps a populated world. The world must contain the player; its field
    /// of view is computed immediately.
    pub fn new(mut world: World, config: SimConfig) -> Result<Self, SimError> {
        let mut resolver = ActionResolver::new(&config);
        resolver.refresh_visibility(&mut world)?;
        Ok(Self {
            world,
            scheduler: TurnScheduler::new(&config),
            resolver,
            effects: EffectSink::new(),
            config,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    pub fn resolver(&self) -> &ActionResolver {
        &self.resolver
    }

    /// Effects of the most recently resolved action.
    pub fn effects(&self) -> &EffectSink {
        &self.effects
    }

    pub fn last_visibility(&self) -> Option<&VisibilityReport> {
        self.resolver.last_visibility()
    }

    /// Advances the simulation by one resolved action or one scheduling
    /// decision.
    pub fn step(&mut self) -> Result<GameResult, SimError> {
        if self.world.is_game_over() {
            self.effects.clear();
            self.resolver.clear();
            return Ok(GameResult::game_over());
        }

        let result = if self.resolver.is_idle() {
            self.scheduler.advance(&mut self.world, &mut self.resolver)
        } else {
            self.resolver.resolve_next(&mut self.world, &mut self.effects)
        };

        if let Err(err) = &result {
            tracing::error!(
                error = %err,
                code = err.error_code(),
                severity = err.severity().as_str(),
                "simulation step failed"
            );
        }
        result
    }

    /// Steps until the host has something to do: supply input, present
    /// effects, offer a cancel, or show the end of the game.
    ///
    /// Never returns if no actor ever needs input and nothing produces
    /// effects; hosts without a player-input gate should pump [`step`]
    /// instead.
    ///
    /// [`step`]: Self::step
    pub fn process(&mut self) -> Result<GameResult, SimError> {
        loop {
            let result = self.step()?;
            if !result.is_continue() {
                return Ok(result);
            }
        }
    }

    /// Forwards a cancel request to the actor marked by the latest
    /// check-for-cancel yield. Single shot: returns false if there is no
    /// eligible actor, including on a second call.
    pub fn cancel_eligible_actor(&mut self) -> bool {
        let Some(id) = self.resolver.take_cancel_eligible() else {
            return false;
        };
        match self.world.actor_mut(id).and_then(|actor| actor.behavior_mut()) {
            Some(behavior) => {
                tracing::debug!(actor = %id, "cancel requested");
                behavior.cancel();
                true
            }
            None => false,
        }
    }

    /// Hands the player an action to perform. If the player's current
    /// behavior does not take input, it is replaced by a [`PlayerBehavior`]
    /// holding the action.
    pub fn supply_player_action(&mut self, action: Box<dyn Action>) -> Result<(), SimError> {
        let turn = self.world.turn();
        let player = self
            .world
            .actor_mut(EntityId::PLAYER)
            .ok_or_else(|| SimError::no_player(turn))?;
        let rejected = match player.behavior_mut() {
            Some(behavior) => behavior.supply(action).err(),
            None => Some(action),
        };
        if let Some(action) = rejected {
            player.set_behavior(Box::new(PlayerBehavior::with_action(action)));
        }
        Ok(())
    }

    /// Replaces the player's behavior (to start a run or a rest).
    pub fn set_player_behavior(&mut self, behavior: Box<dyn Behavior>) -> Result<(), SimError> {
        let turn = self.world.turn();
        let player = self
            .world
            .actor_mut(EntityId::PLAYER)
            .ok_or_else(|| SimError::no_player(turn))?;
        player.set_behavior(behavior);
        Ok(())
    }
}
