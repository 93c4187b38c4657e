//! Color types and utilities

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing a color string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string did not start with `#`
    #[error("color string must start with '#': {0}")]
    MissingHash(String),

    /// The string had a length other than `#RGB`, `#RRGGBB` or `#RRGGBBAA`
    #[error("invalid color length {0} (expected 3, 6 or 8 hex digits)")]
    InvalidLength(usize),

    /// The string contained a non-hexadecimal digit
    #[error("invalid hex digit in color: {0}")]
    InvalidDigit(String),
}

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create an opaque color from u8 components (0-255)
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            Self::from_rgba8(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        } else {
            Self::from_rgba8(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
                255,
            )
        }
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Convert to u8 array [r, g, b, a], rounding to the nearest step.
    ///
    /// `Color::from_rgba8(..).to_rgba8()` is lossless.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Linear interpolation between two colors, channel-wise.
    ///
    /// Evaluated as `from * (1 - t) + to * t` so the endpoints are exact:
    /// `t == 0.0` yields `from` and `t == 1.0` yields `to` bit-for-bit.
    pub fn lerp(from: &Self, to: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        Self {
            r: from.r * s + to.r * t,
            g: from.g * s + to.g * t,
            b: from.b * s + to.b * t,
            a: from.a * s + to.a * t,
        }
    }

    /// Composite `self` over `dst` (straight alpha, source-over)
    pub fn over(&self, dst: &Self) -> Self {
        let sa = self.a.clamp(0.0, 1.0);
        let da = dst.a.clamp(0.0, 1.0);
        let out_a = sa + da * (1.0 - sa);
        if out_a <= f32::EPSILON {
            return Color::TRANSPARENT;
        }
        let blend = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
        Self {
            r: blend(self.r, dst.r),
            g: blend(self.g, dst.g),
            b: blend(self.b, dst.b),
            a: out_a,
        }
    }

    /// Convert to HSL. Hue in degrees `[0, 360)`, saturation and lightness in `[0, 1]`.
    /// Alpha is ignored.
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) / 2.0;

        if (max - min).abs() <= f32::EPSILON {
            return (0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == self.r {
            (self.g - self.b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };

        (h * 60.0, s, l)
    }

    /// Create from HSL components plus alpha. Out-of-range inputs are wrapped (hue)
    /// or clamped (saturation, lightness, alpha).
    pub fn from_hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(360.0) / 360.0;
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let a = a.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgba(l, l, l, a);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::rgba(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
            a,
        )
    }

    /// Perceived lightness in HSL terms
    pub fn lightness(&self) -> f32 {
        self.to_hsl().2
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
        let invalid = |_| ColorParseError::InvalidDigit(s.to_string());

        match digits.len() {
            3 => {
                let expand = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17)
                };
                Ok(Self::from_rgb8(
                    expand(0).map_err(invalid)?,
                    expand(1).map_err(invalid)?,
                    expand(2).map_err(invalid)?,
                ))
            }
            6 => Ok(Self::from_rgb8(
                byte(0).map_err(invalid)?,
                byte(2).map_err(invalid)?,
                byte(4).map_err(invalid)?,
            )),
            8 => Ok(Self::from_rgba8(
                byte(0).map_err(invalid)?,
                byte(2).map_err(invalid)?,
                byte(4).map_err(invalid)?,
                byte(6).map_err(invalid)?,
            )),
            n => Err(ColorParseError::InvalidLength(n)),
        }
    }
}

#[inline]
fn channel_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_roundtrip_is_lossless() {
        for v in 0..=255u8 {
            let c = Color::from_rgba8(v, 255 - v, v / 2, 255);
            assert_eq!(c.to_rgba8(), [v, 255 - v, v / 2, 255]);
        }
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let a = Color::from_rgb8(32, 32, 32);
        let b = Color::from_rgb8(243, 243, 243);
        assert_eq!(Color::lerp(&a, &b, 0.0), a);
        assert_eq!(Color::lerp(&a, &b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint_rounds_channelwise() {
        let a = Color::from_rgb8(32, 32, 32);
        let b = Color::from_rgb8(243, 243, 243);
        let [r, g, bl, alpha] = Color::lerp(&a, &b, 0.5).to_rgba8();
        for ch in [r, g, bl] {
            assert!(ch == 137 || ch == 138, "channel was {ch}");
        }
        assert_eq!(alpha, 255);
    }

    #[test]
    fn parse_hex_forms() {
        assert_eq!("#0078D4".parse::<Color>().unwrap(), Color::from_hex(0x0078D4));
        assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(
            "#00000080".parse::<Color>().unwrap().to_rgba8(),
            [0, 0, 0, 128]
        );
        assert!(matches!(
            "0078D4".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#12345".parse::<Color>(),
            Err(ColorParseError::InvalidLength(5))
        ));
        assert!(matches!(
            "#zzzzzz".parse::<Color>(),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn hsl_roundtrip() {
        let c = Color::from_rgb8(0, 120, 215);
        let (h, s, l) = c.to_hsl();
        let back = Color::from_hsla(h, s, l, 1.0);
        assert_eq!(back.to_rgba8(), c.to_rgba8());
    }

    #[test]
    fn gray_has_no_saturation() {
        let (_, s, l) = Color::from_rgb8(128, 128, 128).to_hsl();
        assert_eq!(s, 0.0);
        assert!((l - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn over_with_opaque_source_replaces_destination() {
        let src = Color::from_rgb8(10, 20, 30);
        let dst = Color::from_rgb8(200, 200, 200);
        assert_eq!(src.over(&dst).to_rgba8(), [10, 20, 30, 255]);
    }

    #[test]
    fn over_with_transparent_source_keeps_destination() {
        let dst = Color::from_rgb8(200, 100, 50);
        assert_eq!(Color::TRANSPARENT.over(&dst).to_rgba8(), dst.to_rgba8());
    }
}
