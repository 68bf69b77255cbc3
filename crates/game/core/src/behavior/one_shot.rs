use crate::action::Action;
use crate::state::{Actor, World};

use super::{Behavior, BehaviorKind};

/// Plays back a single scripted action, then waits for input.
#[derive(Debug)]
pub struct OneShotBehavior {
    action: Option<Box<dyn Action>>,
}

impl OneShotBehavior {
    pub fn new(action: Box<dyn Action>) -> Self {
        Self {
            action: Some(action),
        }
    }

    pub fn is_spent(&self) -> bool {
        self.action.is_none()
    }
}

impl Behavior for OneShotBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::OneShot
    }

    fn needs_user_input(&self) -> bool {
        self.action.is_none()
    }

    fn next_action(&mut self, _actor: &Actor, _world: &World) -> Option<Box<dyn Action>> {
        self.action.take()
    }
}
