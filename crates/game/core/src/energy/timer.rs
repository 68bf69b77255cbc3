//! Per-actor periodic timers.
//!
//! Timers count the turns an actor actually takes, not world ticks, so slow
//! periodic effects such as regeneration stay independent of combat speed.

use core::fmt;

use crate::state::Actor;

/// Callback fired when a timer elapses. It receives the owning actor.
pub type TimerCallback = Box<dyn FnMut(&mut Actor)>;

struct Timer {
    period: u32,
    remaining: u32,
    repeating: bool,
    callback: TimerCallback,
}

/// Ordered list of timers attached to one actor.
#[derive(Default)]
pub struct Timers {
    timers: Vec<Timer>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a timer firing every `period` turns (once if not repeating).
    /// A zero period is treated as one.
    pub fn add(&mut self, period: u32, repeating: bool, callback: TimerCallback) {
        let period = period.max(1);
        self.timers.push(Timer {
            period,
            remaining: period,
            repeating,
            callback,
        });
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advances every timer by one taken turn, firing those that elapse.
    /// Elapsed one-shot timers are dropped.
    pub(crate) fn tick(&mut self, actor: &mut Actor) {
        self.timers.retain_mut(|timer| {
            timer.remaining -= 1;
            if timer.remaining > 0 {
                return true;
            }
            (timer.callback)(actor);
            timer.remaining = timer.period;
            timer.repeating
        });
    }

    /// Appends timers registered elsewhere (e.g. by a callback while this
    /// list was detached from its actor).
    pub(crate) fn absorb(&mut self, other: Timers) {
        self.timers.extend(other.timers);
    }
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.timers
                    .iter()
                    .map(|t| (t.period, t.remaining, t.repeating)),
            )
            .finish()
    }
}
