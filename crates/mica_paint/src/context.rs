//! Paint context - a surface that records drawing commands

use std::sync::Arc;

use image::RgbaImage;
use mica_core::{Color, Point, Rect};

use crate::surface::PaintSurface;

/// A recorded drawing command
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillRoundedRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    StrokeRoundedRect {
        rect: Rect,
        radius: f32,
        color: Color,
        width: f32,
    },
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    PushClip {
        rect: Rect,
        radius: f32,
    },
    PopClip,
    DrawImage {
        rect: Rect,
        width: u32,
        height: u32,
        image: Arc<RgbaImage>,
    },
}

/// Records every call into a command list.
///
/// Hosts without a retained renderer can replay the list; tests inspect it.
#[derive(Clone, Debug, Default)]
pub struct PaintContext {
    commands: Vec<PaintCommand>,
    clip_stack: Vec<Rect>,
}

impl PaintContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current effective clip (intersection of the stack), if any
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Colors of all fill commands, in order
    pub fn fill_colors(&self) -> Vec<Color> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                PaintCommand::FillRect { color, .. }
                | PaintCommand::FillRoundedRect { color, .. }
                | PaintCommand::FillCircle { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    fn push_clip_entry(&mut self, rect: Rect, radius: f32) {
        let effective = match self.clip_stack.last() {
            Some(outer) => outer.intersection(&rect).unwrap_or(Rect::from_origin_size(
                rect.origin,
                mica_core::Size::ZERO,
            )),
            None => rect,
        };
        self.clip_stack.push(effective);
        self.commands.push(PaintCommand::PushClip { rect, radius });
    }
}

impl PaintSurface for PaintContext {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(PaintCommand::FillRect { rect, color });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.commands.push(PaintCommand::FillRoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32) {
        self.commands.push(PaintCommand::StrokeRoundedRect {
            rect,
            radius,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands.push(PaintCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.push_clip_entry(rect, 0.0);
    }

    fn push_rounded_clip(&mut self, rect: Rect, radius: f32) {
        self.push_clip_entry(rect, radius);
    }

    fn pop_clip(&mut self) {
        if self.clip_stack.pop().is_none() {
            tracing::warn!("pop_clip without matching push_clip");
            return;
        }
        self.commands.push(PaintCommand::PopClip);
    }

    fn draw_image(&mut self, rect: Rect, image: &Arc<RgbaImage>) {
        self.commands.push(PaintCommand::DrawImage {
            rect,
            width: image.width(),
            height: image.height(),
            image: Arc::clone(image),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_commands_in_order() {
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        ctx.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        ctx.fill_circle(Point::new(5.0, 5.0), 3.0, Color::BLACK);
        ctx.pop_clip();

        assert_eq!(ctx.commands().len(), 4);
        assert_eq!(ctx.fill_colors(), vec![Color::WHITE, Color::BLACK]);
        assert_eq!(ctx.clip_depth(), 0);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut ctx = PaintContext::new();
        ctx.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        ctx.push_rounded_clip(Rect::new(5.0, 5.0, 10.0, 10.0), 4.0);
        assert_eq!(ctx.current_clip(), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        ctx.pop_clip();
        assert_eq!(ctx.current_clip(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn unbalanced_pop_is_ignored() {
        let mut ctx = PaintContext::new();
        ctx.pop_clip();
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn draw_image_shares_buffer() {
        let image = Arc::new(RgbaImage::new(4, 2));
        let mut ctx = PaintContext::new();
        ctx.draw_image(Rect::new(0.0, 0.0, 8.0, 4.0), &image);
        match &ctx.commands()[0] {
            PaintCommand::DrawImage {
                width,
                height,
                image: recorded,
                ..
            } => {
                assert_eq!((*width, *height), (4, 2));
                assert!(Arc::ptr_eq(recorded, &image));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
