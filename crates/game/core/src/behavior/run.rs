use crate::action::{Action, Direction, WalkAction};
use crate::state::{Actor, World};

use super::{Behavior, BehaviorKind};

/// Keeps walking in one direction, offering the host a chance to cancel
/// after every step.
///
/// The run stops when cancelled, when the actor is disturbed, or when the
/// next tile is not free floor. A stopped run needs user input.
#[derive(Debug)]
pub struct RunBehavior {
    direction: Direction,
    steps: u32,
    stopped: bool,
}

impl RunBehavior {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            steps: 0,
            stopped: false,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Behavior for RunBehavior {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Run
    }

    fn needs_user_input(&self) -> bool {
        self.stopped
    }

    fn next_action(&mut self, actor: &Actor, world: &World) -> Option<Box<dyn Action>> {
        if self.stopped {
            return None;
        }
        if !world.is_walkable(self.direction.step(actor.position)) {
            tracing::debug!(actor = %actor.id, steps = self.steps, "run blocked");
            self.stopped = true;
            return None;
        }
        self.steps += 1;
        Some(Box::new(
            WalkAction::new(actor.id, self.direction).check_for_cancel(),
        ))
    }

    fn disturb(&mut self) {
        self.stopped = true;
    }

    fn cancel(&mut self) {
        self.stopped = true;
    }
}
