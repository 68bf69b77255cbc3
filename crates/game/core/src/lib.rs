//! Deterministic turn-based dungeon simulation.
//!
//! `dungeon-core` holds the rules of the simulation: energy-based initiative,
//! the action resolution state machine, the resumable turn scheduler and the
//! shadow-casting field of view. Hosts build a [`World`], wrap it in a
//! [`Game`] and pump [`Game::process`] until it asks for input.
pub mod action;
pub mod behavior;
pub mod config;
pub mod energy;
pub mod engine;
pub mod env;
pub mod error;
pub mod fov;
pub mod state;

pub use action::{
    Action, ActionContext, ActionQueue, ActionResult, AttackAction, BurnAction, ConditionAction,
    Direction, Effect, EffectSink, OpenDoorAction, PickUpAction, QueuedAction, RestAction,
    WalkAction,
};
pub use behavior::{
    Behavior, BehaviorKind, MonsterBehavior, OneShotBehavior, PlayerBehavior, RestBehavior,
    RunBehavior,
};
pub use config::SimConfig;
pub use energy::{ACTION_COST, Energy, MAX_ENERGY, Speed, Timers};
pub use engine::{ActionResolver, Cursor, Game, GameFlags, GameResult, Stage, TurnScheduler};
pub use env::{MapDimensions, PcgRng, RngSource, TerrainKind};
pub use error::{ErrorContext, ErrorSeverity, GameError, SimError};
pub use fov::{ShadowInterval, ShadowLine, VisibilityField, VisibilityReport};
pub use state::{
    Actor, ActorKind, ActorRegistry, Condition, ConditionKind, Conditions, DamageOutcome,
    EntityId, ItemHandle, ItemLocation, ItemState, ItemTick, Position, Rect, ResourceMeter,
    StateError, Tile, TileGrid, World, WorldStatus,
};
