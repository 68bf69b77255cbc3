use crate::state::EntityId;

use super::Action;

/// Outcome of processing one action.
///
/// Ordinary failures (a wall in the way, nothing to pick up) are expressed as
/// `failure()`, never as errors. A result carrying an alternate is not
/// terminal: the resolver processes the alternate in its place before any of
/// the other fields are honored.
#[derive(Debug)]
#[must_use]
pub struct ActionResult {
    pub success: bool,
    pub done: bool,
    pub alternate: Option<Box<dyn Action>>,
    pub needs_pause: bool,
    pub needs_check_for_cancel: bool,
    /// Actor the final outcome landed on, if any (the defender of an attack).
    pub target: Option<EntityId>,
}

impl ActionResult {
    fn new(success: bool, done: bool) -> Self {
        Self {
            success,
            done,
            alternate: None,
            needs_pause: false,
            needs_check_for_cancel: false,
            target: None,
        }
    }

    pub fn success() -> Self {
        Self::new(true, true)
    }

    pub fn failure() -> Self {
        Self::new(false, true)
    }

    /// Redirects processing to `action`.
    pub fn alternate(action: Box<dyn Action>) -> Self {
        let mut result = Self::new(false, false);
        result.alternate = Some(action);
        result
    }

    /// The action has more work to do and stays at the head of the queue.
    pub fn not_done() -> Self {
        Self::new(false, false)
    }

    pub fn with_pause(mut self) -> Self {
        self.needs_pause = true;
        self
    }

    pub fn with_check_for_cancel(mut self) -> Self {
        self.needs_check_for_cancel = true;
        self
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn is_alternate(&self) -> bool {
        self.alternate.is_some()
    }
}
