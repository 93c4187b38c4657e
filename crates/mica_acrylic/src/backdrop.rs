//! Per-widget acrylic adapter
//!
//! [`AcrylicBackdrop`] asks the compositor for a native backdrop first and
//! falls back to the software pipeline when that is refused. The two paths
//! never mix: a surface is either native, software, or a flat fill.

use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use mica_animation::{Easing, Tween};
use mica_core::{Color, Rect};
use mica_paint::PaintSurface;
use mica_platform::{Compositor, MaterialType, NativeHandle};
use mica_theme::{ColorToken, ThemeRegistry};

use crate::capture::{BackdropCapture, GradientBackdrop};
use crate::config::{AcrylicConfig, AcrylicPreset, DEFAULT_TINT_OPACITY};
use crate::noise::NoiseTexture;
use crate::pipeline;

/// How the surface is currently rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackdropMode {
    /// Flat fallback color
    Flat,
    /// The compositor draws `material` behind the window
    Native(MaterialType),
    /// Painted approximation
    Software,
}

/// Largest software composite edge, in pixels; larger surfaces paint the fallback
pub const MAX_COMPOSITE_SIZE: u32 = 8192;

fn composite_size(rect: Rect) -> Option<(u32, u32)> {
    let edge = |len: f32| {
        let len = len.ceil();
        (len.is_finite() && len > 0.0 && len <= MAX_COMPOSITE_SIZE as f32).then_some(len as u32)
    };
    Some((edge(rect.width())?, edge(rect.height())?))
}

struct CachedComposite {
    width: u32,
    height: u32,
    image: Arc<RgbaImage>,
}

pub struct AcrylicBackdrop {
    config: AcrylicConfig,
    requested: MaterialType,
    mode: BackdropMode,
    handle: Option<NativeHandle>,
    explicit_tint: bool,
    explicit_fallback: bool,
    capture: Box<dyn BackdropCapture>,
    noise: NoiseTexture,
    cache: Option<CachedComposite>,
    tint_opacity_tween: Option<Tween<f32>>,
    tint_color_tween: Option<Tween<Color>>,
}

impl AcrylicBackdrop {
    /// Adapter whose tint and fallback follow `registry` until set explicitly
    pub fn new(config: AcrylicConfig, registry: &ThemeRegistry) -> Self {
        let mut backdrop = Self::with_config(config);
        backdrop.apply_theme(registry);
        backdrop
    }

    /// Adapter using a preset; its tint and fallback are kept across theme changes
    pub fn from_preset(preset: AcrylicPreset, registry: &ThemeRegistry) -> Self {
        let mut backdrop = Self::with_config(preset.config(registry.scheme()));
        backdrop.explicit_tint = true;
        backdrop.explicit_fallback = true;
        backdrop
    }

    fn with_config(config: AcrylicConfig) -> Self {
        Self {
            config,
            requested: MaterialType::None,
            mode: BackdropMode::Flat,
            handle: None,
            explicit_tint: false,
            explicit_fallback: false,
            capture: Box::new(GradientBackdrop::default()),
            noise: NoiseTexture::random(),
            cache: None,
            tint_opacity_tween: None,
            tint_color_tween: None,
        }
    }

    pub fn with_capture(mut self, capture: impl BackdropCapture + 'static) -> Self {
        self.capture = Box::new(capture);
        self.invalidate();
        self
    }

    pub fn with_noise(mut self, noise: NoiseTexture) -> Self {
        self.noise = noise;
        self.invalidate();
        self
    }

    pub fn config(&self) -> &AcrylicConfig {
        &self.config
    }

    pub fn mode(&self) -> BackdropMode {
        self.mode
    }

    pub fn requested_material(&self) -> MaterialType {
        self.requested
    }

    pub fn is_native(&self) -> bool {
        matches!(self.mode, BackdropMode::Native(_))
    }

    // Config setters drop the cached composite

    /// Set an explicit tint; theme changes no longer replace it
    pub fn set_tint_color(&mut self, color: Color) {
        self.explicit_tint = true;
        self.tint_color_tween = None;
        self.config.set_tint_color(color);
        self.invalidate();
    }

    pub fn set_tint_opacity(&mut self, opacity: f32) {
        self.tint_opacity_tween = None;
        self.config.set_tint_opacity(opacity);
        self.invalidate();
    }

    pub fn set_luminosity_opacity(&mut self, opacity: f32) {
        self.config.set_luminosity_opacity(opacity);
        self.invalidate();
    }

    pub fn set_blur_radius(&mut self, radius: f32) {
        self.config.set_blur_radius(radius);
        self.invalidate();
    }

    pub fn set_noise_opacity(&mut self, opacity: f32) {
        self.config.set_noise_opacity(opacity);
        self.invalidate();
    }

    /// Set an explicit fallback; theme changes no longer replace it
    pub fn set_fallback_color(&mut self, color: Color) {
        self.explicit_fallback = true;
        self.config.set_fallback_color(color);
    }

    pub fn set_effect_enabled(&mut self, enabled: bool) {
        self.config.set_effect_enabled(enabled);
    }

    /// Follow the theme again for tint and fallback
    pub fn clear_explicit_colors(&mut self, registry: &ThemeRegistry) {
        self.explicit_tint = false;
        self.explicit_fallback = false;
        self.apply_theme(registry);
    }

    /// Request a native backdrop for `handle`.
    ///
    /// Returns `true` when the compositor accepted it. On refusal the surface
    /// switches to the software pipeline; Mica requests are retried as
    /// Acrylic before that.
    pub fn enable_blur(
        &mut self,
        compositor: &mut dyn Compositor,
        handle: Option<NativeHandle>,
        material: MaterialType,
    ) -> bool {
        self.disable_blur(compositor);
        self.requested = material;

        if material == MaterialType::None {
            self.mode = BackdropMode::Flat;
            return false;
        }

        let Some(handle) = handle else {
            tracing::warn!(%material, "no native handle yet, using software acrylic");
            self.mode = BackdropMode::Software;
            return false;
        };

        let mut candidates = vec![material];
        if material.is_mica() {
            candidates.push(MaterialType::Acrylic);
        }

        for candidate in candidates {
            if compositor.supports(candidate) && compositor.register_backdrop(handle, candidate) {
                if candidate != material {
                    tracing::debug!(%material, %candidate, "native backdrop downgraded");
                }
                self.handle = Some(handle);
                self.mode = BackdropMode::Native(candidate);
                return true;
            }
        }

        tracing::warn!(%material, "native backdrop refused, using software acrylic");
        self.mode = BackdropMode::Software;
        false
    }

    /// Drop any native backdrop and return to the flat fill. Idempotent.
    pub fn disable_blur(&mut self, compositor: &mut dyn Compositor) {
        if let Some(handle) = self.handle.take() {
            compositor.unregister_backdrop(handle);
            tracing::debug!("native backdrop unregistered");
        }
        self.requested = MaterialType::None;
        self.mode = BackdropMode::Flat;
    }

    /// Re-read theme-driven colors after a scheme change
    pub fn apply_theme(&mut self, registry: &ThemeRegistry) {
        let page = registry.color(ColorToken::ApplicationPageBackgroundThemeBrush);
        if !self.explicit_tint {
            self.tint_color_tween = None;
            self.config.set_tint_color(page.with_alpha(DEFAULT_TINT_OPACITY));
            self.invalidate();
        }
        if !self.explicit_fallback {
            self.config.set_fallback_color(page.with_alpha(1.0));
        }
    }

    /// The software composite for a `width` x `height` surface, cached until
    /// the size or a parameter changes
    pub fn composite(&mut self, width: u32, height: u32) -> Option<Arc<RgbaImage>> {
        if width == 0 || height == 0 {
            return None;
        }
        if width > MAX_COMPOSITE_SIZE || height > MAX_COMPOSITE_SIZE {
            tracing::warn!(width, height, "acrylic surface too large, painting fallback");
            return None;
        }
        if let Some(cached) = &self.cache {
            if cached.width == width && cached.height == height {
                return Some(Arc::clone(&cached.image));
            }
        }

        let backdrop = self.capture.capture(self.config.source(), width, height)?;
        let image = Arc::new(pipeline::compose(&backdrop, &self.config, Some(&self.noise)));
        self.cache = Some(CachedComposite {
            width,
            height,
            image: Arc::clone(&image),
        });
        Some(image)
    }

    /// Paint the surface into `rect` (widget-local)
    pub fn paint(&mut self, surface: &mut dyn PaintSurface, rect: Rect, corner_radius: f32) {
        let mode = if self.config.effect_enabled() {
            self.mode
        } else {
            BackdropMode::Flat
        };

        match mode {
            // The compositor draws behind the transparent window
            BackdropMode::Native(_) => {}
            BackdropMode::Flat => {
                surface.fill_rounded_rect(rect, corner_radius, self.config.fallback_color());
            }
            BackdropMode::Software => {
                let image = composite_size(rect)
                    .and_then(|(width, height)| self.composite(width, height));
                match image {
                    Some(image) => {
                        surface.push_rounded_clip(rect, corner_radius);
                        surface.draw_image(rect, &image);
                        surface.pop_clip();
                    }
                    None => {
                        surface.fill_rounded_rect(rect, corner_radius, self.config.fallback_color());
                    }
                }
            }
        }
    }

    pub fn animate_tint_opacity(&mut self, target: f32, duration: Duration) {
        let target = target.clamp(0.0, 1.0);
        self.tint_opacity_tween = Some(Tween::new(
            self.config.tint_opacity(),
            target,
            duration,
            Easing::OutCubic,
        ));
    }

    /// Animate toward an explicit tint
    pub fn animate_tint_color(&mut self, target: Color, duration: Duration) {
        self.explicit_tint = true;
        self.tint_color_tween = Some(Tween::new(
            self.config.tint_color(),
            target,
            duration,
            Easing::OutCubic,
        ));
    }

    pub fn is_animating(&self) -> bool {
        self.tint_opacity_tween.is_some() || self.tint_color_tween.is_some()
    }

    /// Advance tint animations. Returns `true` when a repaint is needed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let mut changed = false;

        if let Some(tween) = &mut self.tint_opacity_tween {
            let value = tween.tick(dt);
            let finished = tween.is_finished();
            self.config.set_tint_opacity(value);
            if finished {
                self.tint_opacity_tween = None;
            }
            changed = true;
        }

        if let Some(tween) = &mut self.tint_color_tween {
            let value = tween.tick(dt);
            let finished = tween.is_finished();
            self.config.set_tint_color(value);
            if finished {
                self.tint_color_tween = None;
            }
            changed = true;
        }

        if changed {
            self.invalidate();
        }
        changed
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }
}

impl std::fmt::Debug for AcrylicBackdrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AcrylicBackdrop")
            .field("config", &self.config)
            .field("requested", &self.requested)
            .field("mode", &self.mode)
            .field("explicit_tint", &self.explicit_tint)
            .field("explicit_fallback", &self.explicit_fallback)
            .field("animating", &self.is_animating())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mica_paint::{PaintCommand, PaintContext};
    use mica_theme::ThemeMode;

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 16.0, 12.0)
    }

    fn light_backdrop() -> AcrylicBackdrop {
        AcrylicBackdrop::new(AcrylicConfig::default(), &ThemeRegistry::headless())
    }

    #[test]
    fn starts_flat_with_theme_colors() {
        let mut registry = ThemeRegistry::headless();
        registry.set_theme_mode(ThemeMode::Dark);
        let mut backdrop = AcrylicBackdrop::new(AcrylicConfig::default(), &registry);

        assert_eq!(backdrop.mode(), BackdropMode::Flat);
        assert_eq!(backdrop.config().fallback_color().to_rgba8(), [32, 32, 32, 255]);
        assert_eq!(backdrop.config().tint_color().to_rgba8(), [32, 32, 32, 204]);

        let mut ctx = PaintContext::new();
        backdrop.paint(&mut ctx, rect(), 4.0);
        assert_eq!(ctx.fill_colors(), vec![Color::from_rgb8(32, 32, 32)]);
    }

    #[test]
    fn explicit_tint_survives_theme_change() {
        let mut registry = ThemeRegistry::headless();
        let mut backdrop = light_backdrop();
        backdrop.set_tint_color(Color::from_rgb8(0, 120, 215));
        registry.set_theme_mode(ThemeMode::Dark);
        backdrop.apply_theme(&registry);
        assert_eq!(backdrop.config().tint_color().to_rgba8(), [0, 120, 215, 255]);
        // Fallback still follows the theme
        assert_eq!(backdrop.config().fallback_color().to_rgba8(), [32, 32, 32, 255]);

        backdrop.clear_explicit_colors(&registry);
        assert_eq!(backdrop.config().tint_color().to_rgba8(), [32, 32, 32, 204]);
    }

    #[test]
    fn software_paint_draws_clipped_image() {
        let mut ctx = PaintContext::new();
        let mut backdrop = light_backdrop().with_noise(NoiseTexture::generate(1));
        backdrop.mode = BackdropMode::Software;
        backdrop.paint(&mut ctx, rect(), 4.0);

        let cmds = ctx.commands();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(cmds[0], PaintCommand::PushClip { .. }));
        assert!(matches!(
            cmds[1],
            PaintCommand::DrawImage { width: 16, height: 12, .. }
        ));
        assert!(matches!(cmds[2], PaintCommand::PopClip));
    }

    #[test]
    fn composite_is_cached_until_changed() {
        let mut backdrop = light_backdrop();
        let a = backdrop.composite(8, 8).unwrap();
        let b = backdrop.composite(8, 8).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        backdrop.set_blur_radius(5.0);
        let c = backdrop.composite(8, 8).unwrap();
        assert!(!Arc::ptr_eq(&a, &c));

        let d = backdrop.composite(4, 8).unwrap();
        assert_eq!(d.dimensions(), (4, 8));
        assert!(backdrop.composite(0, 8).is_none());
    }

    #[test]
    fn disabled_effect_paints_fallback() {
        let mut ctx = PaintContext::new();
        let mut backdrop = light_backdrop();
        backdrop.mode = BackdropMode::Software;
        backdrop.set_effect_enabled(false);
        backdrop.set_fallback_color(Color::from_rgb8(1, 2, 3));
        backdrop.paint(&mut ctx, rect(), 0.0);
        assert_eq!(ctx.fill_colors(), vec![Color::from_rgb8(1, 2, 3)]);
    }

    #[test]
    fn oversized_surface_paints_fallback() {
        let mut ctx = PaintContext::new();
        let mut backdrop = light_backdrop();
        backdrop.mode = BackdropMode::Software;
        backdrop.paint(&mut ctx, Rect::new(0.0, 0.0, 1.0e9, 10.0), 0.0);
        backdrop.paint(&mut ctx, Rect::new(0.0, 0.0, f32::INFINITY, 10.0), 0.0);
        assert_eq!(ctx.fill_colors(), vec![Color::from_rgb8(243, 243, 243); 2]);
        assert!(backdrop.composite(MAX_COMPOSITE_SIZE + 1, 8).is_none());
    }

    #[test]
    fn tint_opacity_animation() {
        let mut backdrop = light_backdrop();
        backdrop.animate_tint_opacity(0.2, Duration::from_millis(200));
        assert!(backdrop.is_animating());

        assert!(backdrop.tick(Duration::from_millis(100)));
        let mid = backdrop.config().tint_opacity();
        assert!(mid < 0.8 && mid > 0.2);

        assert!(backdrop.tick(Duration::from_millis(100)));
        assert_eq!(backdrop.config().tint_opacity(), 0.2);
        assert!(!backdrop.is_animating());
        assert!(!backdrop.tick(Duration::from_millis(33)));
    }

    #[test]
    fn tint_color_animation_is_explicit() {
        let registry = ThemeRegistry::headless();
        let mut backdrop = light_backdrop();
        backdrop.animate_tint_color(Color::BLACK, Duration::from_millis(100));
        backdrop.tick(Duration::from_millis(100));
        backdrop.apply_theme(&registry);
        assert_eq!(backdrop.config().tint_color(), Color::BLACK);
    }
}
