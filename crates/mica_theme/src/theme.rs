//! Theme modes and the light/dark token bundle

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ThemeError};
use crate::tokens::ColorTokens;

pub use mica_platform::ColorScheme;

/// User-selected theme mode
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the operating system's scheme
    #[default]
    Auto,
}

impl ThemeMode {
    /// The scheme this mode pins, if any
    pub fn fixed_scheme(&self) -> Option<ColorScheme> {
        match self {
            ThemeMode::Light => Some(ColorScheme::Light),
            ThemeMode::Dark => Some(ColorScheme::Dark),
            ThemeMode::Auto => None,
        }
    }
}

impl From<ColorScheme> for ThemeMode {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => ThemeMode::Light,
            ColorScheme::Dark => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
            ThemeMode::Auto => f.write_str("auto"),
        }
    }
}

/// Visual algorithm used when animating between schemes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionMode {
    /// A circle of the new theme expanding from the trigger point
    #[default]
    Ripple,
    /// Every widget cross-fades its background
    Fade,
}

/// A light and a dark token set.
///
/// Both sets are immutable once built and shared by reference; switching
/// schemes swaps the `Arc`, never the contents.
#[derive(Clone, Debug)]
pub struct ThemeBundle {
    light: Arc<ColorTokens>,
    dark: Arc<ColorTokens>,
}

impl ThemeBundle {
    /// Build a bundle, checking that both sets declare the same names
    pub fn new(light: ColorTokens, dark: ColorTokens) -> Result<Self> {
        let bundle = Self::from_parts(light, dark);
        bundle.validate()?;
        Ok(bundle)
    }

    /// Build without validation; callers guarantee matching sets
    pub(crate) fn from_parts(light: ColorTokens, dark: ColorTokens) -> Self {
        Self {
            light: Arc::new(light),
            dark: Arc::new(dark),
        }
    }

    pub fn for_scheme(&self, scheme: ColorScheme) -> &Arc<ColorTokens> {
        match scheme {
            ColorScheme::Light => &self.light,
            ColorScheme::Dark => &self.dark,
        }
    }

    pub fn light(&self) -> &Arc<ColorTokens> {
        &self.light
    }

    pub fn dark(&self) -> &Arc<ColorTokens> {
        &self.dark
    }

    /// Every light token has a dark counterpart and vice versa
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = self.light.names().find(|n| !self.dark.contains(n)) {
            return Err(ThemeError::MissingDarkToken(name.to_string()));
        }
        if let Some(name) = self.dark.names().find(|n| !self.light.contains(n)) {
            return Err(ThemeError::MissingLightToken(name.to_string()));
        }
        Ok(())
    }

    /// Add a token to both schemes, producing new sets
    pub(crate) fn with_token(&self, name: &str, light: mica_core::Color, dark: mica_core::Color) -> Self {
        let mut light_set = (*self.light).clone();
        let mut dark_set = (*self.dark).clone();
        light_set.insert(name, light);
        dark_set.insert(name, dark);
        Self::from_parts(light_set, dark_set)
    }
}
