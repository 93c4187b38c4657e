//! The drawing surface contract consumed from the host toolkit

use std::sync::Arc;

use image::RgbaImage;
use mica_core::{Color, Point, Rect};

/// A drawing surface handed to widgets during paint.
///
/// Coordinates are local to the widget being painted. Clips nest; every
/// `push_clip*` must be balanced by a `pop_clip`.
pub trait PaintSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Restrict subsequent drawing to `rect`
    fn push_clip(&mut self, rect: Rect);

    /// Restrict subsequent drawing to a rounded rectangle
    fn push_rounded_clip(&mut self, rect: Rect, radius: f32) {
        let _ = radius;
        self.push_clip(rect);
    }

    fn pop_clip(&mut self);

    /// Draw a pixel buffer stretched to `rect`
    fn draw_image(&mut self, rect: Rect, image: &Arc<RgbaImage>);
}
