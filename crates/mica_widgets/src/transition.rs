//! Per-widget transition state
//!
//! The root computes one [`TransitionFrame`] per tick and copies it into every
//! transitioning widget. Widgets only derive their own values from it (the
//! touched flag and the current fade color); they never advance anything on
//! their own.

use mica_core::{Color, Point, Rect};
use mica_theme::TransitionMode;

/// Shared parameters of one tick, in global coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    pub mode: TransitionMode,
    pub center: Point,
    pub radius: f32,
    /// Fixed for the whole run
    pub max_radius: f32,
    pub fade_progress: f32,
}

impl TransitionFrame {
    /// First frame of a run
    pub fn start(mode: TransitionMode, center: Point, max_radius: f32) -> Self {
        Self {
            mode,
            center,
            radius: 0.0,
            max_radius,
            fade_progress: 0.0,
        }
    }

    /// Frame at normalized `progress` of the same run.
    ///
    /// Computed from the start values, not from the previous frame.
    pub fn at(&self, progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let mut frame = *self;
        match self.mode {
            TransitionMode::Ripple => frame.radius = self.max_radius * progress,
            TransitionMode::Fade => frame.fade_progress = progress,
        }
        frame
    }
}

/// Transition state owned by one widget
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionState {
    is_transitioning: bool,
    mode: TransitionMode,
    center: Point,
    current_radius: f32,
    max_radius: f32,
    fade_progress: f32,
    old_color: Color,
    new_color: Color,
    has_been_touched: bool,
}

impl Default for TransitionState {
    fn default() -> Self {
        Self {
            is_transitioning: false,
            mode: TransitionMode::Ripple,
            center: Point::ZERO,
            current_radius: 0.0,
            max_radius: 0.0,
            fade_progress: 0.0,
            old_color: Color::TRANSPARENT,
            new_color: Color::TRANSPARENT,
            has_been_touched: false,
        }
    }
}

impl TransitionState {
    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn mode(&self) -> TransitionMode {
        self.mode
    }

    /// Ripple center in global coordinates
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn current_radius(&self) -> f32 {
        self.current_radius
    }

    pub fn max_radius(&self) -> f32 {
        self.max_radius
    }

    pub fn fade_progress(&self) -> f32 {
        self.fade_progress
    }

    pub fn old_color(&self) -> Color {
        self.old_color
    }

    pub fn new_color(&self) -> Color {
        self.new_color
    }

    /// Whether the ripple has reached this widget during the current run
    pub fn has_been_touched(&self) -> bool {
        self.has_been_touched
    }

    /// Ripple center relative to a widget whose global origin is `origin`
    pub fn local_center(&self, origin: Point) -> Point {
        self.center - origin
    }

    /// Start a run with this widget's own color pair
    pub fn arm(&mut self, frame: &TransitionFrame, old_color: Color, new_color: Color) {
        *self = Self {
            is_transitioning: true,
            mode: frame.mode,
            center: frame.center,
            current_radius: frame.radius,
            max_radius: frame.max_radius,
            fade_progress: frame.fade_progress,
            old_color,
            new_color,
            has_been_touched: false,
        };
    }

    /// Copy a tick's shared values in and update the touched flag against
    /// `bounds` (global). Ignored when not transitioning.
    pub fn apply_frame(&mut self, frame: &TransitionFrame, bounds: Rect) {
        if !self.is_transitioning {
            return;
        }
        self.mode = frame.mode;
        self.center = frame.center;
        self.current_radius = frame.radius;
        self.max_radius = frame.max_radius;
        self.fade_progress = frame.fade_progress;

        if self.mode == TransitionMode::Ripple
            && !self.has_been_touched
            && bounds.intersects_circle(frame.center, frame.radius)
        {
            self.has_been_touched = true;
            tracing::trace!(radius = frame.radius, "ripple reached widget");
        }
    }

    /// End the run at its terminal values
    pub fn finish(&mut self) {
        if !self.is_transitioning {
            return;
        }
        self.is_transitioning = false;
        match self.mode {
            TransitionMode::Ripple => {
                self.current_radius = self.max_radius;
                self.has_been_touched = true;
            }
            TransitionMode::Fade => self.fade_progress = 1.0,
        }
    }

    /// Background for a fade at the current progress
    pub fn fade_color(&self) -> Color {
        Color::lerp(&self.old_color, &self.new_color, self.fade_progress)
    }
}
