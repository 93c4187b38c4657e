//! Mica Acrylic
//!
//! Translucent backdrop materials for widgets.
//!
//! A surface first asks the platform [`Compositor`](mica_platform::Compositor)
//! for a native backdrop. When the compositor refuses (older OS, remote
//! display, no compositor at all) the surface paints a software
//! approximation instead:
//!
//! ```text
//! backdrop -> blur -> luminosity layer -> tint -> noise
//! ```
//!
//! # Example
//!
//! ```rust
//! use mica_acrylic::{AcrylicBackdrop, AcrylicConfig, BackdropMode, MaterialType};
//! use mica_platform::HeadlessPlatform;
//! use mica_theme::ThemeRegistry;
//!
//! let theme = ThemeRegistry::headless();
//! let mut compositor = HeadlessPlatform::new();
//!
//! let mut backdrop = AcrylicBackdrop::new(AcrylicConfig::default(), &theme);
//!
//! // No native handle and no compositor: software path
//! assert!(!backdrop.enable_blur(&mut compositor, None, MaterialType::Acrylic));
//! assert_eq!(backdrop.mode(), BackdropMode::Software);
//! ```

pub mod backdrop;
pub mod capture;
pub mod config;
pub mod luminosity;
pub mod noise;
pub mod pipeline;

pub use backdrop::{AcrylicBackdrop, BackdropMode, MAX_COMPOSITE_SIZE};
pub use capture::{BackdropCapture, GradientBackdrop};
pub use config::{
    AcrylicConfig, AcrylicPreset, BackgroundSource, DEFAULT_BLUR_RADIUS,
    DEFAULT_LUMINOSITY_OPACITY, DEFAULT_NOISE_OPACITY, DEFAULT_TINT_OPACITY,
};
pub use luminosity::luminosity_color;
pub use mica_platform::MaterialType;
pub use noise::NoiseTexture;
pub use pipeline::compose;
