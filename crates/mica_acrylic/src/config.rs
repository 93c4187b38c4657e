//! Acrylic material parameters and presets

use mica_core::Color;
use mica_theme::ColorScheme;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TINT_OPACITY: f32 = 0.8;
pub const DEFAULT_LUMINOSITY_OPACITY: f32 = 0.85;
pub const DEFAULT_BLUR_RADIUS: f32 = 30.0;
pub const DEFAULT_NOISE_OPACITY: f32 = 0.02;

/// What the material samples from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundSource {
    /// Content behind the window (desktop, other apps)
    HostBackdrop,
    /// Content behind the element inside the app
    #[default]
    Backdrop,
}

/// Parameters of the software acrylic recipe.
///
/// Setters clamp out-of-range input instead of failing.
#[derive(Clone, Debug, PartialEq)]
pub struct AcrylicConfig {
    tint_color: Color,
    tint_opacity: f32,
    luminosity_opacity: f32,
    blur_radius: f32,
    noise_opacity: f32,
    fallback_color: Color,
    effect_enabled: bool,
    source: BackgroundSource,
}

impl Default for AcrylicConfig {
    fn default() -> Self {
        Self {
            tint_color: Color::from_rgba8(243, 243, 243, 204),
            tint_opacity: DEFAULT_TINT_OPACITY,
            luminosity_opacity: DEFAULT_LUMINOSITY_OPACITY,
            blur_radius: DEFAULT_BLUR_RADIUS,
            noise_opacity: DEFAULT_NOISE_OPACITY,
            fallback_color: Color::from_rgb8(243, 243, 243),
            effect_enabled: true,
            source: BackgroundSource::Backdrop,
        }
    }
}

fn clamp_unit(name: &'static str, value: f32) -> f32 {
    if !(0.0..=1.0).contains(&value) {
        tracing::warn!(parameter = name, value, "acrylic parameter clamped to [0, 1]");
    }
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

impl AcrylicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tint_color(&self) -> Color {
        self.tint_color
    }

    pub fn tint_opacity(&self) -> f32 {
        self.tint_opacity
    }

    pub fn luminosity_opacity(&self) -> f32 {
        self.luminosity_opacity
    }

    pub fn blur_radius(&self) -> f32 {
        self.blur_radius
    }

    pub fn noise_opacity(&self) -> f32 {
        self.noise_opacity
    }

    pub fn fallback_color(&self) -> Color {
        self.fallback_color
    }

    pub fn effect_enabled(&self) -> bool {
        self.effect_enabled
    }

    pub fn source(&self) -> BackgroundSource {
        self.source
    }

    pub fn set_tint_color(&mut self, color: Color) {
        self.tint_color = color;
    }

    pub fn set_tint_opacity(&mut self, opacity: f32) {
        self.tint_opacity = clamp_unit("tint_opacity", opacity);
    }

    pub fn set_luminosity_opacity(&mut self, opacity: f32) {
        self.luminosity_opacity = clamp_unit("luminosity_opacity", opacity);
    }

    /// Negative radii become 0 (no blur)
    pub fn set_blur_radius(&mut self, radius: f32) {
        if radius < 0.0 || radius.is_nan() {
            tracing::warn!(radius, "negative blur radius clamped to 0");
            self.blur_radius = 0.0;
        } else {
            self.blur_radius = radius;
        }
    }

    pub fn set_noise_opacity(&mut self, opacity: f32) {
        self.noise_opacity = clamp_unit("noise_opacity", opacity);
    }

    pub fn set_fallback_color(&mut self, color: Color) {
        self.fallback_color = color;
    }

    pub fn set_effect_enabled(&mut self, enabled: bool) {
        self.effect_enabled = enabled;
    }

    pub fn set_source(&mut self, source: BackgroundSource) {
        self.source = source;
    }

    // Builder forms

    pub fn with_tint(mut self, color: Color, opacity: f32) -> Self {
        self.set_tint_color(color);
        self.set_tint_opacity(opacity);
        self
    }

    pub fn with_luminosity_opacity(mut self, opacity: f32) -> Self {
        self.set_luminosity_opacity(opacity);
        self
    }

    pub fn with_blur_radius(mut self, radius: f32) -> Self {
        self.set_blur_radius(radius);
        self
    }

    pub fn with_noise_opacity(mut self, opacity: f32) -> Self {
        self.set_noise_opacity(opacity);
        self
    }

    pub fn with_fallback_color(mut self, color: Color) -> Self {
        self.set_fallback_color(color);
        self
    }

    pub fn with_source(mut self, source: BackgroundSource) -> Self {
        self.set_source(source);
        self
    }
}

/// Preset surfaces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AcrylicPreset {
    NavigationPanel,
    ContentDialog,
    Sidebar,
    Tooltip,
}

impl AcrylicPreset {
    pub const ALL: [AcrylicPreset; 4] = [
        AcrylicPreset::NavigationPanel,
        AcrylicPreset::ContentDialog,
        AcrylicPreset::Sidebar,
        AcrylicPreset::Tooltip,
    ];

    /// Preset parameters for `scheme`
    pub fn config(&self, scheme: ColorScheme) -> AcrylicConfig {
        let dark = scheme.is_dark();
        // (dark gray, light gray, tint alpha, tint opacity, luminosity, blur, noise, source)
        let (dark_gray, light_gray, alpha, tint_opacity, luminosity, blur, noise, source) =
            match self {
                AcrylicPreset::NavigationPanel => {
                    (32, 243, 153, 0.6, 0.9, 30.0, 0.02, BackgroundSource::Backdrop)
                }
                AcrylicPreset::ContentDialog => {
                    (45, 255, 204, 0.8, 0.85, 40.0, 0.03, BackgroundSource::HostBackdrop)
                }
                AcrylicPreset::Sidebar => {
                    (28, 248, 178, 0.7, 0.8, 25.0, 0.015, BackgroundSource::Backdrop)
                }
                AcrylicPreset::Tooltip => {
                    (50, 255, 230, 0.9, 0.95, 20.0, 0.01, BackgroundSource::HostBackdrop)
                }
            };
        let gray: u8 = if dark { dark_gray } else { light_gray };

        AcrylicConfig::new()
            .with_tint(Color::from_rgba8(gray, gray, gray, alpha), tint_opacity)
            .with_fallback_color(Color::from_rgb8(gray, gray, gray))
            .with_luminosity_opacity(luminosity)
            .with_blur_radius(blur)
            .with_noise_opacity(noise)
            .with_source(source)
    }
}
