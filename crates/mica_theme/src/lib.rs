//! Mica Theme System
//!
//! WinUI-style design tokens and the registry that serves them.
//!
//! - **Color tokens**: two complete sets (light/dark) swapped by reference
//! - **Accent palette**: six variants derived from one accent color
//! - **Typography, spacing, radii**: the WinUI type ramp and scales
//! - **Registry**: mode resolution (including following the OS), overrides,
//!   change listeners and persisted preferences
//!
//! # Quick Start
//!
//! ```rust
//! use mica_theme::{ColorToken, ThemeMode, ThemeRegistry};
//!
//! let mut theme = ThemeRegistry::headless();
//! theme.set_theme_mode(ThemeMode::Dark);
//!
//! let page = theme.color(ColorToken::ApplicationPageBackgroundThemeBrush);
//! assert_eq!(page.to_rgba8(), [32, 32, 32, 255]);
//!
//! // Unknown names never fail
//! assert_eq!(theme.color("NotAToken").to_rgba8(), [255, 255, 255, 255]);
//! ```

pub mod error;
pub mod preferences;
pub mod registry;
pub mod theme;
pub mod themes;
pub mod tokens;

pub use error::{Result, ThemeError};
pub use preferences::ThemePreferences;
pub use registry::{ListenerId, ThemeEvent, ThemeRegistry, MISSING_COLOR};
pub use theme::{ColorScheme, ThemeBundle, ThemeMode, TransitionMode};
pub use themes::winui_bundle;
pub use tokens::{
    accent_variant, default_accent, AccentPalette, ColorToken, ColorTokens, FontStyle, FontToken,
    FontWeight, RadiusToken, RadiusTokens, SpacingToken, SpacingTokens, TypographyTokens,
    DEFAULT_SPACING,
};
