//! Error types surfaced by the runtime.
use dungeon_core::{GameError, SimError};
use thiserror::Error;

pub use crate::scenario::ScenarioError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Scenario(#[from] ScenarioError),

    #[error("simulation failed: {0}")]
    Simulation(#[from] SimError),

    #[error("unknown command {0:?}")]
    UnknownCommand(char),
}

impl RuntimeError {
    /// Stable code for logs; simulation errors keep their own codes.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Scenario(_) => "RUNTIME_SCENARIO",
            Self::Simulation(err) => err.error_code(),
            Self::UnknownCommand(_) => "RUNTIME_UNKNOWN_COMMAND",
        }
    }
}
