use std::collections::VecDeque;

use super::Action;

/// Queue entry with its energy bookkeeping.
#[derive(Debug)]
pub struct QueuedAction {
    pub action: Box<dyn Action>,
    /// Root actions chosen by a behavior pay for the actor's turn.
    pub consumes_energy: bool,
    /// Set once the cost has been paid so retries are free.
    pub(crate) energy_spent: bool,
}

impl QueuedAction {
    pub fn root(action: Box<dyn Action>) -> Self {
        Self {
            action,
            consumes_energy: true,
            energy_spent: false,
        }
    }

    pub fn free(action: Box<dyn Action>) -> Self {
        Self {
            action,
            consumes_energy: false,
            energy_spent: false,
        }
    }

    pub fn energy_spent(&self) -> bool {
        self.energy_spent
    }
}

/// FIFO of actions making up one logical turn of consequences.
#[derive(Debug, Default)]
pub struct ActionQueue {
    entries: VecDeque<QueuedAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: QueuedAction) {
        self.entries.push_back(entry);
    }

    /// Puts a not-done head back in front of everything else.
    pub(crate) fn push_front(&mut self, entry: QueuedAction) {
        self.entries.push_front(entry);
    }

    pub(crate) fn pop_front(&mut self) -> Option<QueuedAction> {
        self.entries.pop_front()
    }

    pub fn front(&self) -> Option<&QueuedAction> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
