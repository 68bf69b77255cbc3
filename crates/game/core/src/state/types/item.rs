use super::{EntityId, Position};

/// Handle referencing an item tracked by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

/// Where an item currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemLocation {
    Floor(Position),
    Carried(EntityId),
}

/// Passive per-tick behavior driven by the item clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemTick {
    /// A light source consuming one unit of fuel per item tick.
    Burning { fuel: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub handle: ItemHandle,
    pub name: String,
    pub location: ItemLocation,
    pub tick: Option<ItemTick>,
}

impl ItemState {
    pub fn new(handle: ItemHandle, name: impl Into<String>, location: ItemLocation) -> Self {
        Self {
            handle,
            name: name.into(),
            location,
            tick: None,
        }
    }

    pub fn with_tick(mut self, tick: ItemTick) -> Self {
        self.tick = Some(tick);
        self
    }

    pub fn is_on_floor_at(&self, position: Position) -> bool {
        self.location == ItemLocation::Floor(position)
    }
}
