//! Typography tokens (WinUI type ramp)

use std::str::FromStr;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Default font family
pub const DEFAULT_FONT_FAMILY: &str = "Segoe UI Variable";

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Semibold,
    Bold,
}

impl FontWeight {
    /// CSS-style numeric weight
    pub fn value(&self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// A resolved text style
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
}

impl FontStyle {
    pub fn new(size: f32, weight: FontWeight) -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            size,
            weight,
        }
    }
}

/// Named text styles
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum FontToken {
    Caption,
    Body,
    BodyStrong,
    Subtitle,
    Title,
    TitleLarge,
    Display,
}

impl FontToken {
    pub const ALL: [FontToken; 7] = [
        FontToken::Caption,
        FontToken::Body,
        FontToken::BodyStrong,
        FontToken::Subtitle,
        FontToken::Title,
        FontToken::TitleLarge,
        FontToken::Display,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontToken::Caption => "CaptionTextBlockStyle",
            FontToken::Body => "BodyTextBlockStyle",
            FontToken::BodyStrong => "BodyStrongTextBlockStyle",
            FontToken::Subtitle => "SubtitleTextBlockStyle",
            FontToken::Title => "TitleTextBlockStyle",
            FontToken::TitleLarge => "TitleLargeTextBlockStyle",
            FontToken::Display => "DisplayTextBlockStyle",
        }
    }
}

impl FromStr for FontToken {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontToken::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// The type ramp
#[derive(Clone, Debug, PartialEq)]
pub struct TypographyTokens {
    styles: FxHashMap<String, FontStyle>,
}

impl TypographyTokens {
    /// Style by name; unknown names fall back to the body style
    pub fn get(&self, name: &str) -> FontStyle {
        self.styles
            .get(name)
            .or_else(|| self.styles.get(FontToken::Body.as_str()))
            .cloned()
            .unwrap_or_else(|| FontStyle::new(14.0, FontWeight::Regular))
    }

    pub fn style(&self, token: FontToken) -> FontStyle {
        self.get(token.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, style: FontStyle) {
        self.styles.insert(name.into(), style);
    }
}

impl Default for TypographyTokens {
    fn default() -> Self {
        use FontWeight::*;
        let ramp = [
            (FontToken::Caption, 12.0, Regular),
            (FontToken::Body, 14.0, Regular),
            (FontToken::BodyStrong, 14.0, Semibold),
            (FontToken::Subtitle, 20.0, Regular),
            (FontToken::Title, 28.0, Semibold),
            (FontToken::TitleLarge, 40.0, Semibold),
            (FontToken::Display, 68.0, Semibold),
        ];
        Self {
            styles: ramp
                .into_iter()
                .map(|(token, size, weight)| (token.as_str().to_string(), FontStyle::new(size, weight)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_ramp() {
        let t = TypographyTokens::default();
        assert_eq!(t.style(FontToken::Caption).size, 12.0);
        assert_eq!(t.style(FontToken::BodyStrong).weight, FontWeight::Semibold);
        assert_eq!(t.style(FontToken::Display).size, 68.0);
        assert_eq!(t.style(FontToken::Subtitle).weight, FontWeight::Regular);
        assert_eq!(t.style(FontToken::Body).family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn unknown_style_is_body() {
        let t = TypographyTokens::default();
        assert_eq!(t.get("HeroTextBlockStyle"), t.style(FontToken::Body));
    }
}
