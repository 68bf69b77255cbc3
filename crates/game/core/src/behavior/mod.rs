//! Actor decision strategies.
//!
//! This module defines the [`Behavior`] trait the scheduler consults whenever
//! an actor has enough energy to act. A behavior either produces the next
//! action or declares that it needs input from the host, which is the only
//! point where the simulation suspends.
//!
//! The behavior is checked out of its actor while [`Behavior::next_action`]
//! runs, so it can freely read the actor and the rest of the world.

mod monster;
mod one_shot;
mod player;
mod rest;
mod run;

pub use monster::MonsterBehavior;
pub use one_shot::OneShotBehavior;
pub use player::PlayerBehavior;
pub use rest::RestBehavior;
pub use run::RunBehavior;

use std::fmt;

use crate::action::Action;
use crate::state::{Actor, World};

/// Behavior variants, used in logs and errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BehaviorKind {
    PlayerInput,
    Monster,
    OneShot,
    Run,
    Rest,
}

/// Decides what an actor does next.
pub trait Behavior: fmt::Debug {
    fn kind(&self) -> BehaviorKind;

    /// True while the behavior cannot proceed without a host-supplied action.
    fn needs_user_input(&self) -> bool {
        false
    }

    /// Produces the next action for `actor`.
    ///
    /// Returning `None` is only legal if the behavior needs user input
    /// afterwards (for example a run that just hit a wall). Anything else is
    /// reported as a fatal error by the scheduler.
    fn next_action(&mut self, actor: &Actor, world: &World) -> Option<Box<dyn Action>>;

    /// Something happened to the actor (it was attacked).
    fn disturb(&mut self) {}

    /// The host asked to interrupt a multi-turn behavior.
    fn cancel(&mut self) {}

    /// Hands a host-chosen action to an input-gated behavior. Behaviors that
    /// do not take input give the action back.
    fn supply(&mut self, action: Box<dyn Action>) -> Result<(), Box<dyn Action>> {
        Err(action)
    }

    /// Whether the actor is paying attention. Only sleeping monsters say no.
    fn is_awake(&self) -> bool {
        true
    }
}
