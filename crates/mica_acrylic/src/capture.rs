//! Backdrop capture for the software path

use image::{Rgba, RgbaImage};

use crate::config::BackgroundSource;

/// Supplies the pixels that sit behind an acrylic surface.
///
/// Hosts that can read back the window or desktop implement this; others use
/// [`GradientBackdrop`].
pub trait BackdropCapture {
    /// Capture a `width` x `height` image of `source`. `None` when the
    /// content is not available (minimised window, no read-back support).
    fn capture(&mut self, source: BackgroundSource, width: u32, height: u32) -> Option<RgbaImage>;
}

/// Approximates the backdrop with a translucent diagonal grey gradient
#[derive(Clone, Copy, Debug)]
pub struct GradientBackdrop {
    pub start: Rgba<u8>,
    pub end: Rgba<u8>,
}

impl Default for GradientBackdrop {
    fn default() -> Self {
        Self {
            start: Rgba([200, 200, 200, 100]),
            end: Rgba([150, 150, 150, 100]),
        }
    }
}

impl GradientBackdrop {
    pub fn render(&self, width: u32, height: u32) -> RgbaImage {
        // Projection onto the top-left -> bottom-right diagonal
        let w = width.saturating_sub(1) as f32;
        let h = height.saturating_sub(1) as f32;
        let len2 = w * w + h * h;

        RgbaImage::from_fn(width, height, |x, y| {
            let t = if len2 > 0.0 {
                ((x as f32 * w + y as f32 * h) / len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mix = |i: usize| {
                let a = self.start[i] as f32;
                let b = self.end[i] as f32;
                (a + (b - a) * t).round() as u8
            };
            Rgba([mix(0), mix(1), mix(2), mix(3)])
        })
    }
}

impl BackdropCapture for GradientBackdrop {
    fn capture(&mut self, _source: BackgroundSource, width: u32, height: u32) -> Option<RgbaImage> {
        Some(self.render(width, height))
    }
}
