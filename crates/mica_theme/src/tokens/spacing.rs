//! Spacing and corner radius tokens

use rustc_hash::FxHashMap;

/// Spacing returned for names that were never registered
pub const DEFAULT_SPACING: f32 = 8.0;

/// Spacing scale keys
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum SpacingToken {
    XXSmall,
    XSmall,
    Small,
    Medium,
    Large,
    XLarge,
    XXLarge,
}

impl SpacingToken {
    pub const ALL: [SpacingToken; 7] = [
        SpacingToken::XXSmall,
        SpacingToken::XSmall,
        SpacingToken::Small,
        SpacingToken::Medium,
        SpacingToken::Large,
        SpacingToken::XLarge,
        SpacingToken::XXLarge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpacingToken::XXSmall => "XXSmall",
            SpacingToken::XSmall => "XSmall",
            SpacingToken::Small => "Small",
            SpacingToken::Medium => "Medium",
            SpacingToken::Large => "Large",
            SpacingToken::XLarge => "XLarge",
            SpacingToken::XXLarge => "XXLarge",
        }
    }

    fn default_value(&self) -> f32 {
        match self {
            SpacingToken::XXSmall => 2.0,
            SpacingToken::XSmall => 4.0,
            SpacingToken::Small => 8.0,
            SpacingToken::Medium => 12.0,
            SpacingToken::Large => 16.0,
            SpacingToken::XLarge => 24.0,
            SpacingToken::XXLarge => 32.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpacingTokens {
    values: FxHashMap<String, f32>,
}

impl SpacingTokens {
    /// Spacing by name; unknown names return [`DEFAULT_SPACING`]
    pub fn get(&self, name: &str) -> f32 {
        self.values.get(name).copied().unwrap_or(DEFAULT_SPACING)
    }

    pub fn token(&self, token: SpacingToken) -> f32 {
        self.get(token.as_str())
    }

    /// Negative values are clamped to zero
    pub fn set(&mut self, name: impl Into<String>, value: f32) {
        let name = name.into();
        if value < 0.0 {
            tracing::warn!(%name, value, "negative spacing clamped to 0");
        }
        self.values.insert(name, value.max(0.0));
    }
}

impl Default for SpacingTokens {
    fn default() -> Self {
        Self {
            values: SpacingToken::ALL
                .iter()
                .map(|t| (t.as_str().to_string(), t.default_value()))
                .collect(),
        }
    }
}

/// Corner radius keys
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum RadiusToken {
    None,
    Small,
    #[default]
    Medium,
    Large,
    XLarge,
}

/// Corner radius scale
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusTokens {
    pub none: f32,
    pub small: f32,
    pub medium: f32,
    pub large: f32,
    pub xlarge: f32,
}

impl RadiusTokens {
    pub fn get(&self, token: RadiusToken) -> f32 {
        match token {
            RadiusToken::None => self.none,
            RadiusToken::Small => self.small,
            RadiusToken::Medium => self.medium,
            RadiusToken::Large => self.large,
            RadiusToken::XLarge => self.xlarge,
        }
    }
}

impl Default for RadiusTokens {
    fn default() -> Self {
        Self {
            none: 0.0,
            small: 2.0,
            medium: 4.0,
            large: 8.0,
            xlarge: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_scale_and_fallback() {
        let mut s = SpacingTokens::default();
        assert_eq!(s.token(SpacingToken::XXSmall), 2.0);
        assert_eq!(s.token(SpacingToken::XXLarge), 32.0);
        assert_eq!(s.get("Gutter"), DEFAULT_SPACING);

        s.set("Gutter", -3.0);
        assert_eq!(s.get("Gutter"), 0.0);
    }

    #[test]
    fn radius_scale() {
        let r = RadiusTokens::default();
        assert_eq!(r.get(RadiusToken::None), 0.0);
        assert_eq!(r.get(RadiusToken::Medium), 4.0);
        assert_eq!(r.get(RadiusToken::XLarge), 16.0);
    }
}
