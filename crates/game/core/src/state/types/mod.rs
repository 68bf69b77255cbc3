pub mod actor;
pub mod common;
pub mod item;
pub mod registry;
pub mod status;
pub mod tile;

pub use actor::{Actor, ActorKind};
pub use common::{EntityId, Position, Rect, ResourceMeter};
pub use item::{ItemHandle, ItemLocation, ItemState, ItemTick};
pub use registry::ActorRegistry;
pub use status::{Condition, ConditionKind, Conditions};
pub use tile::{Tile, TileGrid};
