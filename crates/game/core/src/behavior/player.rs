use crate::action::Action;
use crate::state::{Actor, World};

use super::{Behavior, BehaviorKind};

/// Waits for the host to supply each action.
#[derive(Debug, Default)]
pub struct PlayerBehavior {
    pending: Option<Box<dyn Action>>,
}

impl PlayerBehavior {
    pub fn new() -> Self {
        Self::default()
    }

    /// A behavior that already holds its first action.
    pub fn with_action(action: Box<dyn Action>) -> Self {
        Self {
            pending: Some(action),
        }
    }
}

impl Behavior for PlayerBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::PlayerInput
    }

    fn needs_user_input(&self) -> bool {
        self.pending.is_none()
    }

    fn next_action(&mut self, _actor: &Actor, _world: &World) -> Option<Box<dyn Action>> {
        self.pending.take()
    }

    fn supply(&mut self, action: Box<dyn Action>) -> Result<(), Box<dyn Action>> {
        self.pending = Some(action);
        Ok(())
    }
}
