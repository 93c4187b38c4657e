//! Mica Core
//!
//! Value types shared by every Mica crate:
//!
//! - **Color**: straight-alpha RGBA with u8/hex/HSL conversions
//! - **Geometry**: points, sizes and rectangles, plus the point-to-rectangle
//!   distance used for ripple hit-testing
//!
//! # Example
//!
//! ```rust
//! use mica_core::{Color, Point, Rect};
//!
//! let page = Color::from_rgb8(32, 32, 32);
//! let light = "#f3f3f3".parse::<Color>().unwrap();
//! assert_eq!(Color::lerp(&page, &light, 1.0), light);
//!
//! let child = Rect::new(350.0, 0.0, 50.0, 50.0);
//! assert!(child.intersects_circle(Point::new(50.0, 50.0), 300.0));
//! ```

pub mod color;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use geometry::{Point, Rect, Size};
