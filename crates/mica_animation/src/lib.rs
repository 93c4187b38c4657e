//! Mica Animation
//!
//! Small, deterministic animation primitives:
//!
//! - **Easing**: standard curves plus CSS-style cubic bezier
//! - **Progression**: fixed-step or wall-clock schedules with exact endpoints
//! - **FrameTimer**: the host's repeating timer, with a manual implementation
//!   for tests and headless hosts
//! - **Tween**: single-property animations (opacity, color)

pub mod easing;
pub mod progression;
pub mod timer;
pub mod tween;

pub use easing::Easing;
pub use progression::{ProgressClock, Progression, FADE_STEPS, FRAME_INTERVAL, RIPPLE_STEPS};
pub use timer::{FrameTimer, ManualTimer};
pub use tween::{Interpolate, Tween};
