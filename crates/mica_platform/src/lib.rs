//! Mica Platform
//!
//! Contracts for the host operating system services Mica depends on:
//!
//! - [`Compositor`]: native backdrop (blur/acrylic/mica) registration
//! - [`SystemAppearance`]: OS color scheme and accent color
//!
//! Native backends live in `extensions/`. [`HeadlessPlatform`] is the
//! fallback used everywhere else.

pub mod appearance;
pub mod compositor;
pub mod error;
pub mod headless;

pub use appearance::{ColorScheme, SystemAppearance};
pub use compositor::{Compositor, MaterialType, NativeHandle};
pub use error::{PlatformError, Result};
pub use headless::HeadlessPlatform;
