//! World construction errors.
//!
//! Errors related to building the grid and placing actors and items. These
//! surface while a host populates a world, never during a simulation step.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// An actor with the same id is already registered.
    #[error("actor {actor} is already registered")]
    DuplicateActor { actor: EntityId },

    /// Entity ID allocation overflow (all IDs exhausted).
    #[error("entity id overflow (current: {current})")]
    EntityIdOverflow { current: u32 },

    /// Position is already occupied by another live actor.
    #[error("position {position} is already occupied by {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: EntityId,
    },

    /// Position is outside the map bounds.
    #[error("position {position} is out of bounds (map size: {map_width}x{map_height})")]
    PositionOutOfBounds {
        position: Position,
        map_width: u32,
        map_height: u32,
    },

    /// Position cannot be stood on.
    #[error("position {position} is not passable")]
    Impassable { position: Position },

    /// Only player-kind actors may use the player id and vice versa.
    #[error("actor {actor} does not match the player slot")]
    PlayerMismatch { actor: EntityId },

    #[error("map row {row} has width {found}, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map glyph {glyph:?} at {position}")]
    UnknownGlyph { glyph: char, position: Position },

    #[error("map has no tiles")]
    EmptyMap,
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            EntityIdOverflow { .. } => ErrorSeverity::Fatal,
            DuplicateActor { .. }
            | PositionOccupied { .. }
            | PositionOutOfBounds { .. }
            | Impassable { .. }
            | PlayerMismatch { .. }
            | RaggedMap { .. }
            | UnknownGlyph { .. }
            | EmptyMap => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            DuplicateActor { .. } => "STATE_DUPLICATE_ACTOR",
            EntityIdOverflow { .. } => "STATE_ENTITY_ID_OVERFLOW",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            PositionOutOfBounds { .. } => "STATE_POSITION_OUT_OF_BOUNDS",
            Impassable { .. } => "STATE_IMPASSABLE",
            PlayerMismatch { .. } => "STATE_PLAYER_MISMATCH",
            RaggedMap { .. } => "STATE_RAGGED_MAP",
            UnknownGlyph { .. } => "STATE_UNKNOWN_GLYPH",
            EmptyMap => "STATE_EMPTY_MAP",
        }
    }
}
