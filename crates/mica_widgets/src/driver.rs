//! Theme transition driver
//!
//! One driver animates one widget tree. It owns the shared frame timer and
//! the run's schedule. Each tick it computes the shared [`TransitionFrame`],
//! writes it into every transitioning widget, and only then requests the
//! repaints. When the schedule completes it commits the target theme to the
//! registry and delivers theme-changed notifications.

use std::time::Duration;

use mica_animation::{
    FrameTimer, ProgressClock, Progression, FADE_STEPS, FRAME_INTERVAL, RIPPLE_STEPS,
};
use mica_core::Point;
use mica_theme::{ColorScheme, ThemeMode, ThemeRegistry, TransitionMode};

use crate::transition::TransitionFrame;
use crate::widget::{subtree, visible_subtree, WidgetHost, WidgetId};

struct ActiveRun {
    root: WidgetId,
    clock: ProgressClock,
    start: TransitionFrame,
    frame: TransitionFrame,
    target_scheme: ColorScheme,
    target_mode: ThemeMode,
}

pub struct TransitionDriver {
    timer: Box<dyn FrameTimer>,
    interval: Duration,
    ripple: Progression,
    fade: Progression,
    run: Option<ActiveRun>,
}

impl TransitionDriver {
    /// Driver with the default fixed-step schedules
    pub fn new(timer: impl FrameTimer + 'static) -> Self {
        Self {
            timer: Box::new(timer),
            interval: FRAME_INTERVAL,
            ripple: Progression::stepped(RIPPLE_STEPS),
            fade: Progression::stepped(FADE_STEPS),
            run: None,
        }
    }

    /// Replace the schedule used for `mode`; takes effect on the next run
    pub fn set_progression(&mut self, mode: TransitionMode, progression: Progression) {
        match mode {
            TransitionMode::Ripple => self.ripple = progression,
            TransitionMode::Fade => self.fade = progression,
        }
    }

    pub fn progression(&self, mode: TransitionMode) -> Progression {
        match mode {
            TransitionMode::Ripple => self.ripple,
            TransitionMode::Fade => self.fade,
        }
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub fn is_transitioning(&self) -> bool {
        self.run.is_some()
    }

    /// Root of the running transition
    pub fn root(&self) -> Option<WidgetId> {
        self.run.as_ref().map(|run| run.root)
    }

    /// Shared values of the latest tick
    pub fn frame(&self) -> Option<TransitionFrame> {
        self.run.as_ref().map(|run| run.frame)
    }

    pub fn target_scheme(&self) -> Option<ColorScheme> {
        self.run.as_ref().map(|run| run.target_scheme)
    }

    /// Animate `root` to the opposite of the current scheme.
    ///
    /// `origin` is global; `None` uses the root's last recorded pointer
    /// position, then its center. Returns `false` when a transition is
    /// already running or the root is gone.
    pub fn start_transition<H: WidgetHost + ?Sized>(
        &mut self,
        host: &mut H,
        registry: &ThemeRegistry,
        root: WidgetId,
        mode: TransitionMode,
        origin: Option<Point>,
    ) -> bool {
        let target = registry.scheme().toggle();
        self.start_transition_to(host, registry, root, target, ThemeMode::from(target), mode, origin)
    }

    /// Animate `root` toward `target_scheme`, committing `target_mode` to the
    /// registry when the run completes
    #[allow(clippy::too_many_arguments)]
    pub fn start_transition_to<H: WidgetHost + ?Sized>(
        &mut self,
        host: &mut H,
        registry: &ThemeRegistry,
        root: WidgetId,
        target_scheme: ColorScheme,
        target_mode: ThemeMode,
        mode: TransitionMode,
        origin: Option<Point>,
    ) -> bool {
        if self.run.is_some() {
            tracing::debug!("theme transition already running, request ignored");
            return false;
        }
        let Some(root_bounds) = host.global_bounds(root) else {
            tracing::warn!("theme transition root is not in the tree");
            return false;
        };

        let center = origin
            .or_else(|| {
                host.themed(root)
                    .and_then(|w| w.last_pointer())
                    .map(|local| local + root_bounds.origin)
            })
            .unwrap_or_else(|| root_bounds.center());
        let max_radius = root_bounds.farthest_corner_distance(center);
        let start = TransitionFrame::start(mode, center, max_radius);

        let mut marked = Vec::new();
        for id in visible_subtree(host, root) {
            let Some(widget) = host.themed_mut(id) else {
                continue;
            };
            let token = widget.background_token();
            let old_color = registry.color(token);
            let new_color = registry.color_for_scheme(token, target_scheme);
            widget.arm(&start, old_color, new_color);
            marked.push(id);
        }

        for &id in &marked {
            host.request_repaint(id);
        }

        let progression = self.progression(mode);
        self.timer.start(self.interval);
        self.run = Some(ActiveRun {
            root,
            clock: ProgressClock::new(progression),
            start,
            frame: start,
            target_scheme,
            target_mode,
        });

        tracing::debug!(
            ?mode,
            %target_scheme,
            widgets = marked.len(),
            x = center.x,
            y = center.y,
            max_radius,
            "theme transition started"
        );
        true
    }

    /// Advance one timer tick. Returns `true` while the transition is still
    /// running afterwards.
    pub fn tick<H: WidgetHost + ?Sized>(
        &mut self,
        host: &mut H,
        registry: &mut ThemeRegistry,
        dt: Duration,
    ) -> bool {
        let Some(run) = &mut self.run else {
            return false;
        };

        let progress = run.clock.tick(dt);
        run.frame = run.start.at(progress);
        let frame = run.frame;
        let root = run.root;
        let complete = run.clock.is_complete();

        // Write every widget before any repaint is requested
        let mut updated = Vec::new();
        for id in visible_subtree(host, root) {
            let Some(bounds) = host.global_bounds(id) else {
                continue;
            };
            if let Some(widget) = host.themed_mut(id) {
                if widget.is_transitioning() {
                    widget.apply_frame(&frame, bounds);
                    updated.push(id);
                }
            }
        }
        for &id in &updated {
            host.request_repaint(id);
        }

        tracing::trace!(
            progress,
            radius = frame.radius,
            fade = frame.fade_progress,
            widgets = updated.len(),
            "theme transition tick"
        );

        if complete {
            self.complete(host, registry);
            return false;
        }
        true
    }

    fn complete<H: WidgetHost + ?Sized>(&mut self, host: &mut H, registry: &mut ThemeRegistry) {
        let Some(run) = self.run.take() else {
            return;
        };
        self.timer.stop();
        registry.set_theme_mode(run.target_mode);

        // Widgets hidden mid-run are finished too
        for id in subtree(host, run.root) {
            if let Some(widget) = host.themed_mut(id) {
                widget.finish_transition();
            }
        }
        let delivered = broadcast_theme_changed(host, registry, run.root);

        tracing::debug!(
            scheme = %registry.scheme(),
            widgets = delivered,
            "theme transition complete"
        );
    }
}

impl std::fmt::Debug for TransitionDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionDriver")
            .field("interval", &self.interval)
            .field("ripple", &self.ripple)
            .field("fade", &self.fade)
            .field("frame", &self.frame())
            .finish_non_exhaustive()
    }
}

/// Notify every themed widget under `root` that the theme changed, hidden
/// ones included so they are current when shown again.
///
/// Widgets still mid-transition keep the notification pending until their
/// run completes. Returns the number of widgets notified now.
pub fn broadcast_theme_changed<H: WidgetHost + ?Sized>(
    host: &mut H,
    registry: &ThemeRegistry,
    root: WidgetId,
) -> usize {
    let mut delivered = Vec::new();
    for id in subtree(host, root) {
        if let Some(widget) = host.themed_mut(id) {
            if widget.notify_theme_changed(registry) {
                delivered.push(id);
            }
        }
    }
    for &id in &delivered {
        host.request_repaint(id);
    }
    delivered.len()
}

/// Switch the registry to `mode`, animated when transitions are enabled.
///
/// The ripple starts at the host pointer if it lies inside the root, else at
/// the root's center. Returns `true` when an animation was started.
pub fn switch_theme<H: WidgetHost + ?Sized>(
    driver: &mut TransitionDriver,
    host: &mut H,
    registry: &mut ThemeRegistry,
    root: WidgetId,
    mode: ThemeMode,
) -> bool {
    if driver.is_transitioning() {
        tracing::debug!(%mode, "theme switch ignored during a transition");
        return false;
    }

    let target = registry.resolve_scheme(mode);
    if target == registry.scheme() || !registry.transitions_enabled() {
        let changed = target != registry.scheme();
        registry.set_theme_mode(mode);
        if changed {
            broadcast_theme_changed(host, registry, root);
        }
        return false;
    }

    let Some(bounds) = host.global_bounds(root) else {
        registry.set_theme_mode(mode);
        return false;
    };
    let origin = host
        .pointer_position()
        .filter(|p| bounds.contains(*p))
        .unwrap_or_else(|| bounds.center());

    let transition_mode = registry.transition_mode();
    driver.start_transition_to(host, registry, root, target, mode, transition_mode, Some(origin))
}
