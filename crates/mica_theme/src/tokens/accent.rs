//! Accent color palette
//!
//! Six variants derived from one base color by fixed per-channel factors.
//! Each channel is multiplied, truncated, then clamped to `[0, 255]`; alpha is
//! carried over from the base.

use mica_core::Color;

use super::color::ColorToken;

/// Factors applied to the base accent, in `Light1..3, Dark1..3` order
pub const ACCENT_FACTORS: [(ColorToken, f64); 6] = [
    (ColorToken::SystemAccentColorLight1, 1.2),
    (ColorToken::SystemAccentColorLight2, 1.4),
    (ColorToken::SystemAccentColorLight3, 1.6),
    (ColorToken::SystemAccentColorDark1, 0.8),
    (ColorToken::SystemAccentColorDark2, 0.6),
    (ColorToken::SystemAccentColorDark3, 0.4),
];

/// Default accent when the system reports none
pub fn default_accent() -> Color {
    Color::from_rgb8(0, 120, 215)
}

/// Base accent plus its derived variants
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccentPalette {
    pub base: Color,
    pub light1: Color,
    pub light2: Color,
    pub light3: Color,
    pub dark1: Color,
    pub dark2: Color,
    pub dark3: Color,
}

impl AccentPalette {
    pub fn from_base(base: Color) -> Self {
        Self {
            base,
            light1: accent_variant(base, 1.2),
            light2: accent_variant(base, 1.4),
            light3: accent_variant(base, 1.6),
            dark1: accent_variant(base, 0.8),
            dark2: accent_variant(base, 0.6),
            dark3: accent_variant(base, 0.4),
        }
    }

    /// Look up an accent token; `None` for non-accent tokens
    pub fn get(&self, token: ColorToken) -> Option<Color> {
        match token {
            ColorToken::SystemAccentColor => Some(self.base),
            ColorToken::SystemAccentColorLight1 => Some(self.light1),
            ColorToken::SystemAccentColorLight2 => Some(self.light2),
            ColorToken::SystemAccentColorLight3 => Some(self.light3),
            ColorToken::SystemAccentColorDark1 => Some(self.dark1),
            ColorToken::SystemAccentColorDark2 => Some(self.dark2),
            ColorToken::SystemAccentColorDark3 => Some(self.dark3),
            _ => None,
        }
    }

    /// The six derived variants, in `Light1..3, Dark1..3` order
    pub fn variants(&self) -> [Color; 6] {
        [
            self.light1,
            self.light2,
            self.light3,
            self.dark1,
            self.dark2,
            self.dark3,
        ]
    }
}

impl Default for AccentPalette {
    fn default() -> Self {
        Self::from_base(default_accent())
    }
}

/// Scale each RGB channel by `factor`, truncating then clamping
pub fn accent_variant(base: Color, factor: f64) -> Color {
    let [r, g, b, a] = base.to_rgba8();
    let scale = |c: u8| ((c as f64 * factor) as i32).clamp(0, 255) as u8;
    Color::from_rgba8(scale(r), scale(g), scale(b), a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accent_variants() {
        let palette = AccentPalette::default();
        let rgba: Vec<[u8; 4]> = palette.variants().iter().map(|c| c.to_rgba8()).collect();
        assert_eq!(
            rgba,
            vec![
                [0, 144, 255, 255],
                [0, 168, 255, 255],
                [0, 192, 255, 255],
                [0, 96, 172, 255],
                [0, 72, 129, 255],
                [0, 48, 86, 255],
            ]
        );
    }

    #[test]
    fn alpha_is_preserved() {
        let base = Color::from_rgba8(100, 50, 25, 128);
        assert_eq!(accent_variant(base, 1.6).to_rgba8(), [160, 80, 40, 128]);
    }

    #[test]
    fn factor_table_matches_palette() {
        let palette = AccentPalette::from_base(Color::from_rgb8(200, 100, 10));
        for (token, factor) in ACCENT_FACTORS {
            assert_eq!(
                palette.get(token),
                Some(accent_variant(palette.base, factor))
            );
        }
        assert_eq!(palette.get(ColorToken::TextFillColorPrimary), None);
    }
}
