//! Design tokens for theming
//!
//! - Colors (scheme dependent) and the accent palette (scheme independent)
//! - Typography (the WinUI type ramp)
//! - Spacing and corner radii

mod accent;
mod color;
mod spacing;
mod typography;

pub use accent::*;
pub use color::*;
pub use spacing::*;
pub use typography::*;
