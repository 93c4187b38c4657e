//! The luminosity backing layer

use mica_core::Color;

/// Lightness shift applied toward the middle of the range
pub const LUMINOSITY_DELTA: f32 = 0.1;

/// Backing color for `tint`.
///
/// Hue is kept, saturation halved, and lightness moved by
/// [`LUMINOSITY_DELTA`]: darker for light tints, lighter for dark ones.
/// The result is opaque; callers apply the layer opacity.
pub fn luminosity_color(tint: Color) -> Color {
    let (h, s, l) = tint.to_hsl();
    let l = if l > 0.5 {
        (l - LUMINOSITY_DELTA).max(0.0)
    } else {
        (l + LUMINOSITY_DELTA).min(1.0)
    };
    Color::from_hsla(h, s * 0.5, l, 1.0)
}
