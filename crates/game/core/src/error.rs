//! Common error infrastructure for dungeon-core.
//!
//! Everyday failures (a wall in the way, nothing to pick up) are not errors:
//! they are ordinary [`ActionResult`](crate::action::ActionResult) values.
//! The types here describe programmer-error conditions that abort a
//! simulation step, plus the shared classification used by every error enum
//! in the crate.

use crate::behavior::BehaviorKind;
use crate::state::{EntityId, Position};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: temporary conditions that may succeed on retry
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the simulation cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Entity that triggered the error (if applicable).
    pub actor: Option<EntityId>,

    /// Position where the error occurred (if applicable).
    pub position: Option<Position>,

    /// World turn (tick boundaries crossed) at the time of error.
    pub turn: u64,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    /// Creates a new error context for the given turn.
    #[must_use]
    pub const fn new(turn: u64) -> Self {
        Self {
            actor: None,
            position: None,
            turn,
            message: None,
        }
    }

    /// Attaches an actor to this context (builder pattern).
    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Attaches a position to this context (builder pattern).
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Common trait for all dungeon-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Invariant violations surfaced by [`Game::step`](crate::engine::Game::step).
///
/// None of these are expected during normal play. Once one is returned the
/// session must be considered corrupted and the host should stop pumping it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// An alternate chain did not reach a terminal result within the hop limit.
    #[error("alternate cascade from {action} exceeded {max_hops} hops")]
    AlternateCascade {
        action: &'static str,
        max_hops: usize,
        context: ErrorContext,
    },

    /// A behavior that does not need input produced no action.
    #[error("behavior {behavior} of actor {actor} produced no action")]
    NoAction {
        actor: EntityId,
        behavior: BehaviorKind,
        context: ErrorContext,
    },

    /// An actor reference pointed at an actor that is no longer registered.
    #[error("actor {actor} is not registered")]
    ActorNotFound {
        actor: EntityId,
        context: ErrorContext,
    },

    /// An actor's behavior was consulted while already checked out.
    #[error("actor {actor} has no behavior attached")]
    MissingBehavior {
        actor: EntityId,
        context: ErrorContext,
    },

    /// The visibility origin lies outside the tile grid.
    #[error("visibility origin {origin:?} is out of bounds")]
    OriginOutOfBounds {
        origin: Position,
        context: ErrorContext,
    },

    /// The world has no player actor to anchor visibility on.
    #[error("world has no player actor")]
    NoPlayer { context: ErrorContext },
}

impl SimError {
    pub fn alternate_cascade(
        action: &'static str,
        actor: Option<EntityId>,
        max_hops: usize,
        turn: u64,
    ) -> Self {
        let mut context =
            ErrorContext::new(turn).with_message("alternate chain did not terminate");
        context.actor = actor;
        Self::AlternateCascade {
            action,
            max_hops,
            context,
        }
    }

    pub fn no_action(actor: EntityId, behavior: BehaviorKind, turn: u64) -> Self {
        Self::NoAction {
            actor,
            behavior,
            context: ErrorContext::new(turn).with_actor(actor),
        }
    }

    pub fn actor_not_found(actor: EntityId, turn: u64) -> Self {
        Self::ActorNotFound {
            actor,
            context: ErrorContext::new(turn)
                .with_actor(actor)
                .with_message("reference to removed actor"),
        }
    }

    pub fn missing_behavior(actor: EntityId, turn: u64) -> Self {
        Self::MissingBehavior {
            actor,
            context: ErrorContext::new(turn).with_actor(actor),
        }
    }

    pub fn origin_out_of_bounds(origin: Position, turn: u64) -> Self {
        Self::OriginOutOfBounds {
            origin,
            context: ErrorContext::new(turn).with_position(origin),
        }
    }

    pub fn no_player(turn: u64) -> Self {
        Self::NoPlayer {
            context: ErrorContext::new(turn),
        }
    }
}

impl GameError for SimError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlternateCascade { .. } | Self::NoAction { .. } | Self::NoPlayer { .. } => {
                ErrorSeverity::Fatal
            }
            Self::ActorNotFound { .. }
            | Self::MissingBehavior { .. }
            | Self::OriginOutOfBounds { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::AlternateCascade { context, .. }
            | Self::NoAction { context, .. }
            | Self::ActorNotFound { context, .. }
            | Self::MissingBehavior { context, .. }
            | Self::OriginOutOfBounds { context, .. }
            | Self::NoPlayer { context } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlternateCascade { .. } => "SIM_ALTERNATE_CASCADE",
            Self::NoAction { .. } => "SIM_NO_ACTION",
            Self::ActorNotFound { .. } => "SIM_ACTOR_NOT_FOUND",
            Self::MissingBehavior { .. } => "SIM_MISSING_BEHAVIOR",
            Self::OriginOutOfBounds { .. } => "SIM_ORIGIN_OUT_OF_BOUNDS",
            Self::NoPlayer { .. } => "SIM_NO_PLAYER",
        }
    }
}
