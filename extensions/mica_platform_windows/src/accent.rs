//! Window composition constants shared by the native calls

use mica_core::Color;
use mica_platform::MaterialType;

/// First Windows 11 build; Mica needs at least this
pub const WINDOWS_11_BUILD: u32 = 22000;

/// `WCA_ACCENT_POLICY`
pub const WCA_ACCENT_POLICY: u32 = 19;

/// `ACCENT_STATE` values of the window composition accent policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum AccentState {
    Disabled = 0,
    BlurBehind = 3,
    AcrylicBlurBehind = 4,
}

impl AccentState {
    /// Accent state implementing `material`, for the materials that use one
    pub fn for_material(material: MaterialType) -> Option<Self> {
        match material {
            MaterialType::None => Some(AccentState::Disabled),
            MaterialType::Blur => Some(AccentState::BlurBehind),
            MaterialType::Acrylic => Some(AccentState::AcrylicBlurBehind),
            MaterialType::Mica | MaterialType::MicaAlt => None,
        }
    }
}

/// Pack a color as the policy's `GradientColor` (ABGR)
pub fn gradient_color(color: Color) -> u32 {
    let [r, g, b, a] = color.to_rgba8();
    (a as u32) << 24 | (b as u32) << 16 | (g as u32) << 8 | r as u32
}

/// Decode a DWM colorization value (ARGB) into an opaque color
pub fn colorization_to_color(value: u32) -> Color {
    Color::from_rgb8((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Whether `material` is available on build `build`
pub fn supported_on(material: MaterialType, build: u32) -> bool {
    match material {
        MaterialType::None => true,
        MaterialType::Blur | MaterialType::Acrylic => build > 0,
        MaterialType::Mica | MaterialType::MicaAlt => build >= WINDOWS_11_BUILD,
    }
}
