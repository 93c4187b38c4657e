//! WinUI 3 (Fluent) color tokens
//!
//! Light and dark sets for the control, stroke, text and surface tokens.
//! Accent tokens are not part of either set; they come from the accent
//! palette.

use mica_core::Color;

use crate::theme::ThemeBundle;
use crate::tokens::{ColorToken, ColorTokens};

/// Light-scheme token set
pub fn light_tokens() -> ColorTokens {
    use ColorToken::*;
    [
        (ControlFillColorDefault, Color::from_rgba8(255, 255, 255, 179)),
        (ControlFillColorSecondary, Color::from_rgba8(249, 249, 249, 128)),
        (ControlFillColorTertiary, Color::from_rgba8(249, 249, 249, 77)),
        (ControlFillColorDisabled, Color::from_rgba8(249, 249, 249, 77)),
        (ControlFillColorTransparent, Color::from_rgba8(255, 255, 255, 0)),
        (ControlFillColorInputActive, Color::from_rgb8(255, 255, 255)),
        (ControlStrokeColorDefault, Color::from_rgba8(117, 117, 117, 102)),
        (ControlStrokeColorSecondary, Color::from_rgba8(117, 117, 117, 64)),
        (ControlStrokeColorDisabled, Color::from_rgba8(117, 117, 117, 51)),
        (TextFillColorPrimary, Color::from_rgba8(14, 14, 14, 230)),
        (TextFillColorSecondary, Color::from_rgba8(96, 96, 96, 160)),
        (TextFillColorTertiary, Color::from_rgba8(96, 96, 96, 115)),
        (TextFillColorDisabled, Color::from_rgba8(96, 96, 96, 92)),
        (ApplicationPageBackgroundThemeBrush, Color::from_rgb8(243, 243, 243)),
        (LayerFillColorDefault, Color::from_rgba8(255, 255, 255, 128)),
    ]
    .into_iter()
    .map(|(token, color)| (token.as_str(), color))
    .collect()
}

/// Dark-scheme token set
pub fn dark_tokens() -> ColorTokens {
    use ColorToken::*;
    [
        (ControlFillColorDefault, Color::from_rgba8(255, 255, 255, 15)),
        (ControlFillColorSecondary, Color::from_rgba8(255, 255, 255, 23)),
        (ControlFillColorTertiary, Color::from_rgba8(255, 255, 255, 13)),
        (ControlFillColorDisabled, Color::from_rgba8(255, 255, 255, 10)),
        (ControlFillColorTransparent, Color::from_rgba8(255, 255, 255, 0)),
        (ControlFillColorInputActive, Color::from_rgb8(30, 30, 30)),
        (ControlStrokeColorDefault, Color::from_rgba8(255, 255, 255, 18)),
        (ControlStrokeColorSecondary, Color::from_rgba8(255, 255, 255, 26)),
        (ControlStrokeColorDisabled, Color::from_rgba8(255, 255, 255, 13)),
        (TextFillColorPrimary, Color::from_rgb8(255, 255, 255)),
        (TextFillColorSecondary, Color::from_rgba8(255, 255, 255, 194)),
        (TextFillColorTertiary, Color::from_rgba8(255, 255, 255, 140)),
        (TextFillColorDisabled, Color::from_rgba8(255, 255, 255, 92)),
        (ApplicationPageBackgroundThemeBrush, Color::from_rgb8(32, 32, 32)),
        (LayerFillColorDefault, Color::from_rgba8(58, 58, 58, 77)),
    ]
    .into_iter()
    .map(|(token, color)| (token.as_str(), color))
    .collect()
}

/// The default WinUI bundle
pub fn winui_bundle() -> ThemeBundle {
    ThemeBundle::from_parts(light_tokens(), dark_tokens())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bundle_is_complete() {
        let bundle = winui_bundle();
        assert!(bundle.validate().is_ok());
        assert_eq!(bundle.light().len(), 15);
        for token in ColorToken::ALL.iter().filter(|t| !t.is_accent()) {
            assert!(bundle.light().contains(token), "{token} missing from light set");
            assert!(bundle.dark().contains(token), "{token} missing from dark set");
        }
    }

    #[test]
    fn page_backgrounds() {
        let bundle = winui_bundle();
        assert_eq!(
            bundle.dark().get(ColorToken::ApplicationPageBackgroundThemeBrush).map(|c| c.to_rgba8()),
            Some([32, 32, 32, 255])
        );
        assert_eq!(
            bundle.light().get(ColorToken::ApplicationPageBackgroundThemeBrush).map(|c| c.to_rgba8()),
            Some([243, 243, 243, 255])
        );
    }
}
