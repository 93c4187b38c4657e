//! Repeating frame timer contract
//!
//! The host toolkit owns the actual event-loop timer. Animations only ask for
//! it to be started and stopped; each timer callback is then forwarded to the
//! animation's `tick` by the host.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// A repeating UI timer provided by the host event loop
pub trait FrameTimer {
    /// Start firing every `interval`. Restarting an active timer resets its interval.
    fn start(&mut self, interval: Duration);

    /// Stop firing. Idempotent.
    fn stop(&mut self);

    fn is_active(&self) -> bool;
}

#[derive(Debug, Default)]
struct ManualTimerState {
    active: Cell<bool>,
    interval: Cell<Duration>,
    starts: Cell<u32>,
    stops: Cell<u32>,
}

/// Timer that never fires on its own; the owner calls tick functions by hand.
///
/// Clones share state, so a test can keep one clone to observe the timer
/// after handing another to the animation.
#[derive(Clone, Debug, Default)]
pub struct ManualTimer {
    state: Rc<ManualTimerState>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval(&self) -> Duration {
        self.state.interval.get()
    }

    /// How many times `start` was called
    pub fn start_count(&self) -> u32 {
        self.state.starts.get()
    }

    /// How many times an active timer was stopped
    pub fn stop_count(&self) -> u32 {
        self.state.stops.get()
    }
}

impl FrameTimer for ManualTimer {
    fn start(&mut self, interval: Duration) {
        self.state.interval.set(interval);
        self.state.active.set(true);
        self.state.starts.set(self.state.starts.get() + 1);
        tracing::trace!(?interval, "manual timer started");
    }

    fn stop(&mut self) {
        if self.state.active.replace(false) {
            self.state.stops.set(self.state.stops.get() + 1);
            tracing::trace!("manual timer stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.state.active.get()
    }
}
