//! Timed conditions on actors.
//!
//! Conditions last a number of turns the afflicted actor takes. After each of
//! its turns, every active condition is resolved as its own action (see
//! [`ConditionAction`](crate::action::ConditionAction)), which applies the
//! condition's per-turn effect and counts it down.

use arrayvec::ArrayVec;

use crate::config::SimConfig;

/// Types of timed conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ConditionKind {
    /// Loses `potency` health per turn.
    Poisoned,

    /// Stored energy is drained each turn.
    Frozen,
}

/// A single condition with its remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub kind: ConditionKind,
    pub turns_remaining: u32,
    pub potency: u32,
}

impl Condition {
    pub fn new(kind: ConditionKind, turns: u32, potency: u32) -> Self {
        Self {
            kind,
            turns_remaining: turns,
            potency,
        }
    }
}

/// Active conditions on an actor (at most one per kind).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conditions {
    active: ArrayVec<Condition, { SimConfig::MAX_CONDITIONS }>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition. Reapplying an active kind keeps the longer duration
    /// and the stronger potency. Returns false if no slot is free.
    pub fn apply(&mut self, condition: Condition) -> bool {
        if let Some(existing) = self.active.iter_mut().find(|c| c.kind == condition.kind) {
            existing.turns_remaining = existing.turns_remaining.max(condition.turns_remaining);
            existing.potency = existing.potency.max(condition.potency);
            return true;
        }
        self.active.try_push(condition).is_ok()
    }

    pub fn get(&self, kind: ConditionKind) -> Option<&Condition> {
        self.active.iter().find(|c| c.kind == kind)
    }

    pub fn has(&self, kind: ConditionKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ConditionKind> + '_ {
        self.active.iter().map(|c| c.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Counts one turn off `kind`. Returns `Some(true)` if the condition
    /// expired and was removed, `None` if it was not active.
    pub fn count_down(&mut self, kind: ConditionKind) -> Option<bool> {
        let index = self.active.iter().position(|c| c.kind == kind)?;
        let condition = &mut self.active[index];
        condition.turns_remaining = condition.turns_remaining.saturating_sub(1);
        if condition.turns_remaining == 0 {
            self.active.remove(index);
            Some(true)
        } else {
            Some(false)
        }
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
