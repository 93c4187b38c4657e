//! Mica Paint
//!
//! The drawing contract widgets paint against. The host toolkit implements
//! [`PaintSurface`]; [`PaintContext`] is a recording implementation for
//! headless hosts and tests.

pub mod context;
pub mod surface;

pub use context::{PaintCommand, PaintContext};
pub use surface::PaintSurface;
