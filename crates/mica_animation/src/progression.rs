//! Progress schedules for frame-paced animations
//!
//! A [`Progression`] describes how an animation's normalized progress grows
//! from 0 to 1. [`ProgressClock`] tracks one run of it.
//!
//! Progress is always derived from the step index (or elapsed time) rather
//! than accumulated, so `progress() == 1.0` exactly at completion and no
//! rounding error builds up over a run.

use std::time::Duration;

use crate::easing::Easing;

/// Interval of the shared transition timer (~30 Hz)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Steps for a ripple to cover its maximum radius
pub const RIPPLE_STEPS: u32 = 20;

/// Steps for a fade to go from the old to the new color
pub const FADE_STEPS: u32 = 15;

/// How progress advances per tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Progression {
    /// Fixed number of equal steps, one per tick regardless of elapsed time.
    Stepped { steps: u32 },
    /// Wall-clock driven; progress is `easing(elapsed / duration)`.
    Timed { duration: Duration, easing: Easing },
}

impl Progression {
    pub const fn stepped(steps: u32) -> Self {
        Progression::Stepped { steps }
    }

    pub const fn timed(duration: Duration, easing: Easing) -> Self {
        Progression::Timed { duration, easing }
    }

    /// Nominal duration at the given tick interval
    pub fn nominal_duration(&self, interval: Duration) -> Duration {
        match self {
            Progression::Stepped { steps } => interval * (*steps).max(1),
            Progression::Timed { duration, .. } => *duration,
        }
    }
}

/// One run of a [`Progression`]
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressClock {
    progression: Progression,
    step: u32,
    elapsed: Duration,
}

impl ProgressClock {
    pub fn new(progression: Progression) -> Self {
        Self {
            progression,
            step: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    /// Number of ticks taken so far
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Advance by one tick. `dt` is only consulted by timed progressions.
    ///
    /// Ticking a completed clock is a no-op.
    pub fn tick(&mut self, dt: Duration) -> f32 {
        if self.is_complete() {
            return self.progress();
        }
        self.step = self.step.saturating_add(1);
        self.elapsed = self.elapsed.saturating_add(dt);
        self.progress()
    }

    /// Normalized progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        match self.progression {
            Progression::Stepped { steps } => {
                let steps = steps.max(1);
                if self.step >= steps {
                    1.0
                } else {
                    self.step as f32 / steps as f32
                }
            }
            Progression::Timed { duration, easing } => {
                if duration.is_zero() || self.elapsed >= duration {
                    1.0
                } else {
                    easing.apply(self.elapsed.as_secs_f32() / duration.as_secs_f32())
                }
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        match self.progression {
            Progression::Stepped { steps } => self.step >= steps.max(1),
            Progression::Timed { duration, .. } => self.elapsed >= duration,
        }
    }
}
