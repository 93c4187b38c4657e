//! Property tweens
//!
//! A [`Tween`] animates one value from a start to a target over a duration.
//! Used for short property animations such as an acrylic layer's tint.

use std::time::Duration;

use mica_core::Color;

use crate::easing::Easing;

/// Values that can be linearly interpolated
pub trait Interpolate: Copy {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        from * (1.0 - t) + to * t
    }
}

impl Interpolate for Color {
    fn interpolate(from: &Self, to: &Self, t: f32) -> Self {
        Color::lerp(from, to, t)
    }
}

/// A single-value animation toward a target
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate> {
    from: T,
    to: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing,
        }
    }

    pub fn target(&self) -> T {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        T::interpolate(&self.from, &self.to, self.easing.apply(t))
    }

    /// Advance by `dt` and return the new value
    pub fn tick(&mut self, dt: Duration) -> T {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_tween_reaches_target() {
        let mut tween = Tween::new(0.8f32, 0.2, Duration::from_millis(300), Easing::OutCubic);
        let mid = tween.tick(Duration::from_millis(150));
        assert!(mid < 0.8 && mid > 0.2);
        assert_eq!(tween.tick(Duration::from_millis(500)), 0.2);
        assert!(tween.is_finished());
    }

    #[test]
    fn zero_duration_is_immediately_finished() {
        let tween = Tween::new(Color::BLACK, Color::WHITE, Duration::ZERO, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), Color::WHITE);
    }

    #[test]
    fn color_tween_midpoint() {
        let mut tween = Tween::new(Color::BLACK, Color::WHITE, Duration::from_millis(100), Easing::Linear);
        let c = tween.tick(Duration::from_millis(50));
        assert!((c.r - 0.5).abs() < 1e-6);
        assert_eq!(c.a, 1.0);
    }
}
