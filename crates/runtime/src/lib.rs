//! Host side of the dungeon simulation.
//!
//! `dungeon-runtime` wires the simulation core to a process: configuration
//! from the environment, a tracing subscriber, ASCII scenarios and a
//! headless [`Session`] that pumps a [`dungeon_core::Game`] while answering
//! its yields from an [`InputProvider`].
//!
//! - [`config`] loads [`RuntimeConfig`]
//! - [`logging`] installs the subscriber
//! - [`scenario`] turns ASCII maps into worlds
//! - [`session`] drives a game to completion
pub mod config;
pub mod error;
pub mod logging;
pub mod scenario;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use scenario::{Scenario, ScenarioError, TORCH_FUEL};
pub use session::{
    Command, InputProvider, Outcome, ScriptedInput, Session, SessionStats, SessionSummary,
};
