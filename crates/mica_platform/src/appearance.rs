//! System appearance queries (color scheme and accent color)

use std::fmt;

use mica_core::Color;
use serde::{Deserialize, Serialize};

/// Light or dark color scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Get the opposite scheme
    pub fn toggle(&self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Light => f.write_str("light"),
            ColorScheme::Dark => f.write_str("dark"),
        }
    }
}

/// Host OS appearance settings
///
/// All queries are best-effort. `None` means the OS does not report the value.
pub trait SystemAppearance {
    /// The user's app color scheme preference
    fn color_scheme(&self) -> Option<ColorScheme>;

    /// The user's accent color
    fn accent_color(&self) -> Option<Color>;

    /// Start delivering scheme-change notifications to the host.
    ///
    /// Returns `false` if the OS has no such notification; the caller keeps
    /// whatever scheme it last resolved.
    fn subscribe(&mut self) -> bool;

    fn unsubscribe(&mut self);
}
