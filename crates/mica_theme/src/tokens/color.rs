//! Color tokens for theming

use std::fmt;
use std::str::FromStr;

use mica_core::Color;
use rustc_hash::FxHashMap;

/// Semantic color token names from the WinUI design language
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum ColorToken {
    // Accent (derived from the accent color, identical in both schemes)
    SystemAccentColor,
    SystemAccentColorLight1,
    SystemAccentColorLight2,
    SystemAccentColorLight3,
    SystemAccentColorDark1,
    SystemAccentColorDark2,
    SystemAccentColorDark3,

    // Control fills
    ControlFillColorDefault,
    ControlFillColorSecondary,
    ControlFillColorTertiary,
    ControlFillColorDisabled,
    ControlFillColorTransparent,
    ControlFillColorInputActive,

    // Control strokes
    ControlStrokeColorDefault,
    ControlStrokeColorSecondary,
    ControlStrokeColorDisabled,

    // Text
    TextFillColorPrimary,
    TextFillColorSecondary,
    TextFillColorTertiary,
    TextFillColorDisabled,

    // Surfaces
    ApplicationPageBackgroundThemeBrush,
    LayerFillColorDefault,
}

impl ColorToken {
    /// Every declared token, accent tokens first
    pub const ALL: [ColorToken; 22] = [
        ColorToken::SystemAccentColor,
        ColorToken::SystemAccentColorLight1,
        ColorToken::SystemAccentColorLight2,
        ColorToken::SystemAccentColorLight3,
        ColorToken::SystemAccentColorDark1,
        ColorToken::SystemAccentColorDark2,
        ColorToken::SystemAccentColorDark3,
        ColorToken::ControlFillColorDefault,
        ColorToken::ControlFillColorSecondary,
        ColorToken::ControlFillColorTertiary,
        ColorToken::ControlFillColorDisabled,
        ColorToken::ControlFillColorTransparent,
        ColorToken::ControlFillColorInputActive,
        ColorToken::ControlStrokeColorDefault,
        ColorToken::ControlStrokeColorSecondary,
        ColorToken::ControlStrokeColorDisabled,
        ColorToken::TextFillColorPrimary,
        ColorToken::TextFillColorSecondary,
        ColorToken::TextFillColorTertiary,
        ColorToken::TextFillColorDisabled,
        ColorToken::ApplicationPageBackgroundThemeBrush,
        ColorToken::LayerFillColorDefault,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorToken::SystemAccentColor => "SystemAccentColor",
            ColorToken::SystemAccentColorLight1 => "SystemAccentColorLight1",
            ColorToken::SystemAccentColorLight2 => "SystemAccentColorLight2",
            ColorToken::SystemAccentColorLight3 => "SystemAccentColorLight3",
            ColorToken::SystemAccentColorDark1 => "SystemAccentColorDark1",
            ColorToken::SystemAccentColorDark2 => "SystemAccentColorDark2",
            ColorToken::SystemAccentColorDark3 => "SystemAccentColorDark3",
            ColorToken::ControlFillColorDefault => "ControlFillColorDefault",
            ColorToken::ControlFillColorSecondary => "ControlFillColorSecondary",
            ColorToken::ControlFillColorTertiary => "ControlFillColorTertiary",
            ColorToken::ControlFillColorDisabled => "ControlFillColorDisabled",
            ColorToken::ControlFillColorTransparent => "ControlFillColorTransparent",
            ColorToken::ControlFillColorInputActive => "ControlFillColorInputActive",
            ColorToken::ControlStrokeColorDefault => "ControlStrokeColorDefault",
            ColorToken::ControlStrokeColorSecondary => "ControlStrokeColorSecondary",
            ColorToken::ControlStrokeColorDisabled => "ControlStrokeColorDisabled",
            ColorToken::TextFillColorPrimary => "TextFillColorPrimary",
            ColorToken::TextFillColorSecondary => "TextFillColorSecondary",
            ColorToken::TextFillColorTertiary => "TextFillColorTertiary",
            ColorToken::TextFillColorDisabled => "TextFillColorDisabled",
            ColorToken::ApplicationPageBackgroundThemeBrush => {
                "ApplicationPageBackgroundThemeBrush"
            }
            ColorToken::LayerFillColorDefault => "LayerFillColorDefault",
        }
    }

    /// Accent tokens come from the accent palette, not the light/dark sets
    pub fn is_accent(&self) -> bool {
        matches!(
            self,
            ColorToken::SystemAccentColor
                | ColorToken::SystemAccentColorLight1
                | ColorToken::SystemAccentColorLight2
                | ColorToken::SystemAccentColorLight3
                | ColorToken::SystemAccentColorDark1
                | ColorToken::SystemAccentColorDark2
                | ColorToken::SystemAccentColorDark3
        )
    }
}

impl AsRef<str> for ColorToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a declared token name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownColorToken(pub String);

impl fmt::Display for UnknownColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color token '{}'", self.0)
    }
}

impl std::error::Error for UnknownColorToken {}

impl FromStr for ColorToken {
    type Err = UnknownColorToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorToken::ALL
            .iter()
            .copied()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| UnknownColorToken(s.to_string()))
    }
}

/// One complete scheme's worth of named colors.
///
/// Keyed by name so that applications can register their own tokens next to
/// the declared ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ColorTokens {
    colors: FxHashMap<String, Color>,
}

impl ColorTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a color by token name
    pub fn get(&self, name: impl AsRef<str>) -> Option<Color> {
        self.colors.get(name.as_ref()).copied()
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.colors.contains_key(name.as_ref())
    }

    /// Insert or replace a color, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, color: Color) -> Option<Color> {
        self.colors.insert(name.into(), color)
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, color: Color) -> Self {
        self.insert(name, color);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Color)> for ColorTokens {
    fn from_iter<I: IntoIterator<Item = (S, Color)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
