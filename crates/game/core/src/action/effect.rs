//! Presentation events produced while actions resolve.

use crate::state::{ConditionKind, EntityId, ItemHandle, Position};

/// A transient event for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Effect {
    Damage {
        target: EntityId,
        position: Position,
        amount: u32,
    },
    Death {
        actor: EntityId,
        position: Position,
    },
    DoorOpened {
        position: Position,
    },
    PickedUp {
        actor: EntityId,
        item: ItemHandle,
    },
    LightOut {
        item: ItemHandle,
    },
    ConditionExpired {
        actor: EntityId,
        condition: ConditionKind,
    },
}

/// Ordered effects of the queue head currently being resolved.
///
/// The resolver clears the sink before each head, so after a host-visible
/// yield it holds exactly the events of the head that caused it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EffectSink {
    effects: Vec<Effect>,
}

impl EffectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.effects
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    /// Removes and returns everything recorded so far.
    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }
}
