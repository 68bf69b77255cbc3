use bitflags::bitflags;

use crate::state::EntityId;

bitflags! {
    /// Host-visible reasons a simulation step stopped.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct GameFlags: u8 {
        /// The actor in `GameResult::actor` waits for a supplied action.
        const NEEDS_USER_INPUT = 1 << 0;
        /// Effects were produced; present them before resuming.
        const NEEDS_PAUSE = 1 << 1;
        /// The actor in `GameResult::actor` may be cancelled now.
        const CHECK_FOR_CANCEL = 1 << 2;
        /// The game ended. Latched.
        const GAME_OVER = 1 << 3;
    }
}

/// Summary of one simulation step. Empty flags mean "keep going".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameResult {
    pub flags: GameFlags,
    pub actor: Option<EntityId>,
}

impl GameResult {
    pub const CONTINUE: Self = Self {
        flags: GameFlags::empty(),
        actor: None,
    };

    pub const fn needs_user_input(actor: EntityId) -> Self {
        Self {
            flags: GameFlags::NEEDS_USER_INPUT,
            actor: Some(actor),
        }
    }

    pub const fn needs_pause() -> Self {
        Self {
            flags: GameFlags::NEEDS_PAUSE,
            actor: None,
        }
    }

    pub const fn check_for_cancel(actor: Option<EntityId>) -> Self {
        Self {
            flags: GameFlags::CHECK_FOR_CANCEL,
            actor,
        }
    }

    pub const fn game_over() -> Self {
        Self {
            flags: GameFlags::GAME_OVER.union(GameFlags::NEEDS_PAUSE),
            actor: None,
        }
    }

    /// Nothing for the host to do; the next step can run immediately.
    pub fn is_continue(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn needs_input(&self) -> bool {
        self.flags.contains(GameFlags::NEEDS_USER_INPUT)
    }

    pub fn is_game_over(&self) -> bool {
        self.flags.contains(GameFlags::GAME_OVER)
    }
}
