//! Themed widget base
//!
//! Every themed control embeds a [`ThemedWidget`]. It paints the background
//! token (or the transition between two schemes of it) and forwards to the
//! control's [`Paintable`] content.

use mica_acrylic::AcrylicBackdrop;
use mica_core::{Color, Point, Rect};
use mica_paint::PaintSurface;
use mica_theme::{ColorToken, ThemeRegistry, TransitionMode};

use crate::paintable::Paintable;
use crate::transition::{TransitionFrame, TransitionState};

pub struct ThemedWidget {
    background: String,
    corner_radius: f32,
    transition: TransitionState,
    last_pointer: Option<Point>,
    pending_theme_change: bool,
    theme_changes: u64,
    acrylic: Option<AcrylicBackdrop>,
    content: Option<Box<dyn Paintable>>,
}

impl Default for ThemedWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemedWidget {
    /// Widget painting the page background
    pub fn new() -> Self {
        Self {
            background: ColorToken::ApplicationPageBackgroundThemeBrush
                .as_str()
                .to_string(),
            corner_radius: 0.0,
            transition: TransitionState::default(),
            last_pointer: None,
            pending_theme_change: false,
            theme_changes: 0,
            acrylic: None,
            content: None,
        }
    }

    pub fn with_background(mut self, token: impl AsRef<str>) -> Self {
        self.background = token.as_ref().to_string();
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius.max(0.0);
        self
    }

    pub fn with_content(mut self, content: impl Paintable + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Paint an acrylic material instead of the flat background token.
    /// Transitions still animate the token. Theme-driven acrylic colors are
    /// synced to `theme` here.
    pub fn with_acrylic(mut self, mut acrylic: AcrylicBackdrop, theme: &ThemeRegistry) -> Self {
        acrylic.apply_theme(theme);
        self.acrylic = Some(acrylic);
        self
    }

    pub fn acrylic(&self) -> Option<&AcrylicBackdrop> {
        self.acrylic.as_ref()
    }

    pub fn acrylic_mut(&mut self) -> Option<&mut AcrylicBackdrop> {
        self.acrylic.as_mut()
    }

    pub fn background_token(&self) -> &str {
        &self.background
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }

    pub fn transition(&self) -> &TransitionState {
        &self.transition
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_transitioning()
    }

    /// Record the pointer position (local coordinates) for the default
    /// transition origin
    pub fn set_last_pointer(&mut self, local: Point) {
        self.last_pointer = Some(local);
    }

    pub fn last_pointer(&self) -> Option<Point> {
        self.last_pointer
    }

    /// Number of theme-changed notifications delivered so far
    pub fn theme_change_count(&self) -> u64 {
        self.theme_changes
    }

    pub fn has_pending_theme_change(&self) -> bool {
        self.pending_theme_change
    }

    pub(crate) fn arm(&mut self, frame: &TransitionFrame, old_color: Color, new_color: Color) {
        self.transition.arm(frame, old_color, new_color);
    }

    pub(crate) fn apply_frame(&mut self, frame: &TransitionFrame, bounds: Rect) {
        self.transition.apply_frame(frame, bounds);
    }

    pub(crate) fn finish_transition(&mut self) {
        self.transition.finish();
    }

    /// Deliver a theme change now, or hold it until the running transition ends.
    /// Returns `true` when delivered.
    pub fn notify_theme_changed(&mut self, theme: &ThemeRegistry) -> bool {
        if self.transition.is_transitioning() {
            self.pending_theme_change = true;
            return false;
        }
        self.pending_theme_change = false;
        self.theme_changes += 1;
        if let Some(acrylic) = &mut self.acrylic {
            acrylic.apply_theme(theme);
        }
        if let Some(content) = &mut self.content {
            content.theme_changed(theme);
        }
        true
    }

    /// Paint background and content. `bounds` is the widget's global
    /// rectangle; drawing happens in local coordinates.
    pub fn paint(&mut self, surface: &mut dyn PaintSurface, theme: &ThemeRegistry, bounds: Rect) {
        let local = Rect::new(0.0, 0.0, bounds.width(), bounds.height());
        self.paint_background(surface, theme, local, bounds.origin);
        if let Some(content) = &mut self.content {
            content.paint(surface, theme, &self.transition, local);
        }
    }

    fn paint_background(
        &mut self,
        surface: &mut dyn PaintSurface,
        theme: &ThemeRegistry,
        local: Rect,
        origin: Point,
    ) {
        let state = &self.transition;
        if !state.is_transitioning() {
            match &mut self.acrylic {
                Some(acrylic) => acrylic.paint(surface, local, self.corner_radius),
                None => {
                    let color = theme.color(&self.background);
                    surface.fill_rounded_rect(local, self.corner_radius, color);
                }
            }
            return;
        }

        match state.mode() {
            TransitionMode::Fade => {
                surface.fill_rounded_rect(local, self.corner_radius, state.fade_color());
            }
            TransitionMode::Ripple => {
                surface.fill_rounded_rect(local, self.corner_radius, state.old_color());
                if state.has_been_touched() && state.current_radius() > 0.0 {
                    surface.push_rounded_clip(local, self.corner_radius);
                    surface.fill_circle(
                        state.local_center(origin),
                        state.current_radius(),
                        state.new_color(),
                    );
                    surface.pop_clip();
                }
            }
        }
    }
}

impl std::fmt::Debug for ThemedWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemedWidget")
            .field("background", &self.background)
            .field("corner_radius", &self.corner_radius)
            .field("transition", &self.transition)
            .field("pending_theme_change", &self.pending_theme_change)
            .field("acrylic", &self.acrylic)
            .field("has_content", &self.content.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_acrylic::AcrylicConfig;
    use mica_paint::{PaintCommand, PaintContext};
    use mica_theme::ThemeMode;

    #[test]
    fn idle_paints_token() {
        let theme = ThemeRegistry::headless();
        let mut widget = ThemedWidget::new().with_background(ColorToken::LayerFillColorDefault);
        let mut ctx = PaintContext::new();
        widget.paint(&mut ctx, &theme, Rect::new(10.0, 10.0, 40.0, 20.0));
        assert_eq!(
            ctx.fill_colors(),
            vec![theme.color(ColorToken::LayerFillColorDefault)]
        );
        assert!(matches!(
            ctx.commands()[0],
            PaintCommand::FillRoundedRect { rect, .. } if rect == Rect::new(0.0, 0.0, 40.0, 20.0)
        ));
    }

    #[test]
    fn ripple_circle_is_local() {
        let theme = ThemeRegistry::headless();
        let mut widget = ThemedWidget::new();
        let bounds = Rect::new(100.0, 50.0, 40.0, 40.0);
        let start = TransitionFrame::start(TransitionMode::Ripple, Point::new(90.0, 60.0), 200.0);
        widget.arm(&start, Color::BLACK, Color::WHITE);
        widget.apply_frame(&start.at(0.5), bounds);

        let mut ctx = PaintContext::new();
        widget.paint(&mut ctx, &theme, bounds);
        let circle = ctx.commands().iter().find_map(|cmd| match cmd {
            PaintCommand::FillCircle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        });
        assert_eq!(circle, Some((Point::new(-10.0, 10.0), 100.0)));
        assert_eq!(ctx.clip_depth(), 0);
    }

    #[test]
    fn untouched_ripple_paints_old_color_only() {
        let theme = ThemeRegistry::headless();
        let mut widget = ThemedWidget::new();
        let bounds = Rect::new(300.0, 0.0, 10.0, 10.0);
        let start = TransitionFrame::start(TransitionMode::Ripple, Point::ZERO, 400.0);
        widget.arm(&start, Color::BLACK, Color::WHITE);
        widget.apply_frame(&start.at(0.1), bounds);

        let mut ctx = PaintContext::new();
        widget.paint(&mut ctx, &theme, bounds);
        assert_eq!(ctx.fill_colors(), vec![Color::BLACK]);
    }

    #[test]
    fn acrylic_replaces_flat_background() {
        let mut theme = ThemeRegistry::headless();
        let backdrop = AcrylicBackdrop::new(AcrylicConfig::default(), &theme);
        let mut widget = ThemedWidget::new()
            .with_corner_radius(8.0)
            .with_acrylic(backdrop, &theme);
        theme.set_theme_mode(ThemeMode::Dark);
        widget.notify_theme_changed(&theme);

        // Flat mode paints the theme-derived fallback
        let mut ctx = PaintContext::new();
        widget.paint(&mut ctx, &theme, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(ctx.fill_colors(), vec![Color::from_rgb8(32, 32, 32)]);
    }

    #[test]
    fn acrylic_built_under_dark_theme_starts_dark() {
        let mut theme = ThemeRegistry::headless();
        theme.set_theme_mode(ThemeMode::Dark);
        let backdrop = AcrylicBackdrop::new(AcrylicConfig::default(), &theme);
        let mut widget = ThemedWidget::new().with_acrylic(backdrop, &theme);

        let acrylic = widget.acrylic().unwrap();
        assert_eq!(acrylic.config().tint_color().to_rgba8(), [32, 32, 32, 204]);

        let mut ctx = PaintContext::new();
        widget.paint(&mut ctx, &theme, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(ctx.fill_colors(), vec![Color::from_rgb8(32, 32, 32)]);
    }

    #[test]
    fn with_acrylic_syncs_a_backdrop_built_for_another_scheme() {
        let light = ThemeRegistry::headless();
        let mut dark = ThemeRegistry::headless();
        dark.set_theme_mode(ThemeMode::Dark);
        let backdrop = AcrylicBackdrop::new(AcrylicConfig::default(), &light);
        let widget = ThemedWidget::new().with_acrylic(backdrop, &dark);
        let fallback = widget.acrylic().unwrap().config().fallback_color();
        assert_eq!(fallback.to_rgba8(), [32, 32, 32, 255]);
    }

    #[test]
    fn theme_change_is_deferred_while_transitioning() {
        let theme = ThemeRegistry::headless();
        let mut widget = ThemedWidget::new();
        let start = TransitionFrame::start(TransitionMode::Fade, Point::ZERO, 1.0);
        widget.arm(&start, Color::BLACK, Color::WHITE);

        assert!(!widget.notify_theme_changed(&theme));
        assert!(widget.has_pending_theme_change());
        assert_eq!(widget.theme_change_count(), 0);

        widget.finish_transition();
        assert!(widget.notify_theme_changed(&theme));
        assert!(!widget.has_pending_theme_change());
        assert_eq!(widget.theme_change_count(), 1);
    }
}
