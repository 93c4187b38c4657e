//! The theme registry
//!
//! One `ThemeRegistry` is the source of truth for every theme-dependent value
//! a widget reads. It is an ordinary value: the host creates it at startup and
//! passes it to whatever needs it. Tests create one per case.
//!
//! Lookup order for colors:
//! 1. application overrides (scheme independent)
//! 2. the accent palette (for the `SystemAccentColor*` tokens)
//! 3. the active scheme's token set
//!
//! Anything else resolves to [`MISSING_COLOR`].

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use mica_core::Color;
use mica_platform::{HeadlessPlatform, SystemAppearance};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::Result;
use crate::preferences::ThemePreferences;
use crate::theme::{ColorScheme, ThemeBundle, ThemeMode, TransitionMode};
use crate::themes::winui_bundle;
use crate::tokens::{
    default_accent, AccentPalette, ColorToken, ColorTokens, FontStyle, RadiusToken, RadiusTokens,
    SpacingTokens, TypographyTokens,
};

/// Returned for color names that no set, palette or override defines
pub const MISSING_COLOR: Color = Color::WHITE;

/// Handle returned by [`ThemeRegistry::on_change`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Notifications delivered to registry listeners
#[derive(Clone, Debug, PartialEq)]
pub enum ThemeEvent {
    /// The active token set was swapped
    SchemeChanged(ColorScheme),
    ModeChanged(ThemeMode),
    AccentChanged(Color),
    /// A single token was overridden, registered or reset
    ColorChanged(String),
}

type Listener = Box<dyn FnMut(&ThemeEvent)>;

pub struct ThemeRegistry {
    bundle: ThemeBundle,
    mode: ThemeMode,
    scheme: ColorScheme,
    active: Arc<ColorTokens>,
    accent: AccentPalette,
    overrides: FxHashMap<String, Color>,
    typography: TypographyTokens,
    spacing: SpacingTokens,
    radii: RadiusTokens,
    transitions_enabled: bool,
    transition_mode: TransitionMode,
    appearance: Box<dyn SystemAppearance>,
    following_system: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    warned_missing: RefCell<FxHashSet<String>>,
}

impl ThemeRegistry {
    /// Registry with the WinUI tokens, following the system scheme
    pub fn new(appearance: impl SystemAppearance + 'static) -> Self {
        Self::build(winui_bundle(), Box::new(appearance))
    }

    /// Registry with no system integration (light scheme, default accent)
    pub fn headless() -> Self {
        Self::new(HeadlessPlatform::new())
    }

    /// Registry with a custom token bundle
    pub fn with_bundle(
        bundle: ThemeBundle,
        appearance: impl SystemAppearance + 'static,
    ) -> Result<Self> {
        bundle.validate()?;
        Ok(Self::build(bundle, Box::new(appearance)))
    }

    fn build(bundle: ThemeBundle, mut appearance: Box<dyn SystemAppearance>) -> Self {
        let accent = appearance.accent_color().unwrap_or_else(default_accent);
        let following_system = appearance.subscribe();
        let scheme = appearance.color_scheme().unwrap_or_default();
        let active = Arc::clone(bundle.for_scheme(scheme));

        tracing::debug!(%scheme, following_system, "theme registry created");

        Self {
            bundle,
            mode: ThemeMode::Auto,
            scheme,
            active,
            accent: AccentPalette::from_base(accent),
            overrides: FxHashMap::default(),
            typography: TypographyTokens::default(),
            spacing: SpacingTokens::default(),
            radii: RadiusTokens::default(),
            transitions_enabled: true,
            transition_mode: TransitionMode::Ripple,
            appearance,
            following_system,
            listeners: Vec::new(),
            next_listener: 0,
            warned_missing: RefCell::new(FxHashSet::default()),
        }
    }

    // ========== Mode & Scheme ==========

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// The resolved scheme currently in effect
    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn is_dark(&self) -> bool {
        self.scheme.is_dark()
    }

    /// Whether OS scheme-change notifications are being delivered
    pub fn is_following_system(&self) -> bool {
        self.following_system
    }

    /// The scheme `mode` would resolve to right now
    pub fn resolve_scheme(&self, mode: ThemeMode) -> ColorScheme {
        mode.fixed_scheme()
            .or_else(|| self.appearance.color_scheme())
            .unwrap_or(self.scheme)
    }

    /// Set the theme mode.
    ///
    /// Swaps the active token set immediately; no animation is run here.
    /// `Auto` subscribes to OS scheme notifications when available.
    /// Setting the current mode again re-resolves its scheme, which picks up
    /// an OS change that has not been polled yet.
    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        if self.mode == mode {
            let scheme = self.resolve_scheme(mode);
            self.apply_scheme(scheme);
            return;
        }
        tracing::debug!(from = %self.mode, to = %mode, "theme mode changed");
        self.mode = mode;

        match mode {
            ThemeMode::Auto => {
                if !self.following_system {
                    self.following_system = self.appearance.subscribe();
                    if !self.following_system {
                        tracing::debug!("system scheme notifications unavailable");
                    }
                }
            }
            ThemeMode::Light | ThemeMode::Dark => {
                if self.following_system {
                    self.appearance.unsubscribe();
                    self.following_system = false;
                }
            }
        }

        let scheme = self.resolve_scheme(mode);
        self.apply_scheme(scheme);
        self.emit(ThemeEvent::ModeChanged(mode));
    }

    /// Called by the host when the OS reports a new scheme
    pub fn system_scheme_changed(&mut self, scheme: ColorScheme) {
        if self.mode != ThemeMode::Auto {
            return;
        }
        self.apply_scheme(scheme);
    }

    /// Re-read the OS scheme; returns `true` if the active scheme changed
    pub fn poll_system_scheme(&mut self) -> bool {
        if self.mode != ThemeMode::Auto {
            return false;
        }
        match self.appearance.color_scheme() {
            Some(scheme) if scheme != self.scheme => {
                self.apply_scheme(scheme);
                true
            }
            _ => false,
        }
    }

    fn apply_scheme(&mut self, scheme: ColorScheme) {
        // Palette is a pure function of the base; recomputing keeps it in step
        // with the swap.
        self.accent = AccentPalette::from_base(self.accent.base);
        if self.scheme == scheme {
            return;
        }
        tracing::debug!(from = %self.scheme, to = %scheme, "color scheme switched");
        self.scheme = scheme;
        self.active = Arc::clone(self.bundle.for_scheme(scheme));
        self.emit(ThemeEvent::SchemeChanged(scheme));
    }

    // ========== Colors ==========

    /// Color for `name` in the active scheme.
    ///
    /// Never fails: unknown names return [`MISSING_COLOR`] and are logged once.
    pub fn color(&self, name: impl AsRef<str>) -> Color {
        self.color_for_scheme(name, self.scheme)
    }

    /// Color for `name` as it would be in `scheme`
    pub fn color_for_scheme(&self, name: impl AsRef<str>, scheme: ColorScheme) -> Color {
        let name = name.as_ref();
        match self.lookup(name, scheme) {
            Some(color) => color,
            None => {
                if self.warned_missing.borrow_mut().insert(name.to_string()) {
                    tracing::warn!(token = name, "unknown color token, using fallback");
                }
                MISSING_COLOR
            }
        }
    }

    /// Like [`color`](Self::color) but `None` for unknown names
    pub fn try_color(&self, name: impl AsRef<str>) -> Option<Color> {
        self.lookup(name.as_ref(), self.scheme)
    }

    pub fn has_color(&self, name: impl AsRef<str>) -> bool {
        self.try_color(name).is_some()
    }

    fn lookup(&self, name: &str, scheme: ColorScheme) -> Option<Color> {
        if let Some(color) = self.overrides.get(name) {
            return Some(*color);
        }
        if name.starts_with("SystemAccentColor") {
            if let Some(color) = name.parse::<ColorToken>().ok().and_then(|t| self.accent.get(t)) {
                return Some(color);
            }
        }
        if scheme == self.scheme {
            self.active.get(name)
        } else {
            self.bundle.for_scheme(scheme).get(name)
        }
    }

    /// The active scheme's token set
    pub fn active_tokens(&self) -> &Arc<ColorTokens> {
        &self.active
    }

    pub fn bundle(&self) -> &ThemeBundle {
        &self.bundle
    }

    /// Override a color in both schemes without touching either token set
    pub fn set_color_override(&mut self, name: impl Into<String>, color: Color) {
        let name = name.into();
        if self.overrides.get(&name) == Some(&color) {
            return;
        }
        self.overrides.insert(name.clone(), color);
        self.emit(ThemeEvent::ColorChanged(name));
    }

    pub fn clear_color_override(&mut self, name: &str) {
        if self.overrides.remove(name).is_some() {
            self.emit(ThemeEvent::ColorChanged(name.to_string()));
        }
    }

    pub fn clear_overrides(&mut self) {
        let names: Vec<String> = self.overrides.drain().map(|(name, _)| name).collect();
        for name in names {
            self.emit(ThemeEvent::ColorChanged(name));
        }
    }

    /// Add a token with a value for each scheme
    pub fn register_token(&mut self, name: &str, light: Color, dark: Color) {
        self.bundle = self.bundle.with_token(name, light, dark);
        self.active = Arc::clone(self.bundle.for_scheme(self.scheme));
        self.warned_missing.borrow_mut().remove(name);
        self.emit(ThemeEvent::ColorChanged(name.to_string()));
    }

    // ========== Accent ==========

    pub fn accent_color(&self) -> Color {
        self.accent.base
    }

    pub fn accent_palette(&self) -> &AccentPalette {
        &self.accent
    }

    /// Replace the accent and recompute its variants. The mode is unchanged.
    pub fn set_accent_color(&mut self, color: Color) {
        if self.accent.base == color {
            return;
        }
        self.accent = AccentPalette::from_base(color);
        tracing::debug!(accent = %color, "accent color changed");
        self.emit(ThemeEvent::AccentChanged(color));
    }

    // ========== Fonts, Spacing, Radii ==========

    pub fn font(&self, name: &str) -> FontStyle {
        self.typography.get(name)
    }

    pub fn set_font(&mut self, name: impl Into<String>, style: FontStyle) {
        self.typography.set(name, style);
    }

    pub fn spacing(&self, name: &str) -> f32 {
        self.spacing.get(name)
    }

    pub fn set_spacing(&mut self, name: impl Into<String>, value: f32) {
        self.spacing.set(name, value);
    }

    pub fn radius(&self, token: RadiusToken) -> f32 {
        self.radii.get(token)
    }

    // ========== Transitions ==========

    pub fn transitions_enabled(&self) -> bool {
        self.transitions_enabled
    }

    pub fn set_transitions_enabled(&mut self, enabled: bool) {
        self.transitions_enabled = enabled;
    }

    pub fn transition_mode(&self) -> TransitionMode {
        self.transition_mode
    }

    pub fn set_transition_mode(&mut self, mode: TransitionMode) {
        self.transition_mode = mode;
    }

    // ========== Listeners ==========

    /// Register a callback for every [`ThemeEvent`]
    pub fn on_change(&mut self, listener: impl FnMut(&ThemeEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: ThemeEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // ========== Preferences ==========

    /// Accent from the system (or the default), mode `Auto`
    pub fn reset_to_default(&mut self) {
        let accent = self.appearance.accent_color().unwrap_or_else(default_accent);
        self.set_accent_color(accent);
        self.set_theme_mode(ThemeMode::Auto);
    }

    /// Snapshot the persisted subset of the registry
    pub fn preferences(&self) -> ThemePreferences {
        ThemePreferences {
            mode: self.mode,
            accent: Some(self.accent.base.to_hex()),
            transitions_enabled: self.transitions_enabled,
            transition_mode: self.transition_mode,
        }
    }

    /// Apply saved preferences. A malformed accent is ignored.
    pub fn apply_preferences(&mut self, prefs: &ThemePreferences) {
        if let Some(hex) = &prefs.accent {
            match hex.parse::<Color>() {
                Ok(color) => self.set_accent_color(color.with_alpha(1.0)),
                Err(err) => tracing::warn!(%err, "ignoring saved accent color"),
            }
        }
        self.transitions_enabled = prefs.transitions_enabled;
        self.transition_mode = prefs.transition_mode;
        self.set_theme_mode(prefs.mode);
    }
}

impl fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("mode", &self.mode)
            .field("scheme", &self.scheme)
            .field("accent", &self.accent.base)
            .field("overrides", &self.overrides.len())
            .field("transitions_enabled", &self.transitions_enabled)
            .field("transition_mode", &self.transition_mode)
            .field("following_system", &self.following_system)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn unknown_token_is_white() {
        let reg = ThemeRegistry::headless();
        assert_eq!(reg.color("NoSuchBrush"), MISSING_COLOR);
        assert_eq!(reg.color("NoSuchBrush").to_rgba8(), [255, 255, 255, 255]);
        assert_eq!(reg.try_color("NoSuchBrush"), None);
    }

    #[test]
    fn explicit_mode_swaps_sets() {
        let mut reg = ThemeRegistry::headless();
        assert_eq!(reg.scheme(), ColorScheme::Light);
        reg.set_theme_mode(ThemeMode::Dark);
        assert!(reg.is_dark());
        assert_eq!(
            reg.color(ColorToken::ApplicationPageBackgroundThemeBrush).to_rgba8(),
            [32, 32, 32, 255]
        );
        assert!(Arc::ptr_eq(reg.active_tokens(), reg.bundle().dark()));
    }

    #[test]
    fn auto_without_notifications_keeps_last_scheme() {
        let mut reg = ThemeRegistry::headless();
        reg.set_theme_mode(ThemeMode::Dark);
        reg.set_theme_mode(ThemeMode::Auto);
        assert!(!reg.is_following_system());
        assert_eq!(reg.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn auto_uses_reported_system_scheme() {
        let mut reg = ThemeRegistry::new(HeadlessPlatform::new().with_color_scheme(ColorScheme::Dark));
        assert_eq!(reg.scheme(), ColorScheme::Dark);
        reg.set_theme_mode(ThemeMode::Light);
        reg.set_theme_mode(ThemeMode::Auto);
        assert_eq!(reg.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn system_changes_ignored_outside_auto() {
        let mut reg = ThemeRegistry::headless();
        reg.set_theme_mode(ThemeMode::Light);
        reg.system_scheme_changed(ColorScheme::Dark);
        assert_eq!(reg.scheme(), ColorScheme::Light);
        reg.set_theme_mode(ThemeMode::Auto);
        reg.system_scheme_changed(ColorScheme::Dark);
        assert_eq!(reg.scheme(), ColorScheme::Dark);
    }

    #[test]
    fn overrides_win_in_both_schemes() {
        let mut reg = ThemeRegistry::headless();
        let brand = Color::from_rgb8(200, 10, 10);
        reg.set_color_override(ColorToken::TextFillColorPrimary.as_str(), brand);
        assert_eq!(reg.color(ColorToken::TextFillColorPrimary), brand);
        reg.set_theme_mode(ThemeMode::Dark);
        assert_eq!(reg.color(ColorToken::TextFillColorPrimary), brand);
        assert_ne!(
            reg.active_tokens().get(ColorToken::TextFillColorPrimary),
            Some(brand)
        );

        reg.clear_overrides();
        assert_eq!(reg.color(ColorToken::TextFillColorPrimary), Color::WHITE);
    }

    #[test]
    fn registered_tokens_follow_scheme() {
        let mut reg = ThemeRegistry::headless();
        reg.register_token("CardBackground", Color::WHITE, Color::BLACK);
        assert_eq!(reg.color("CardBackground"), Color::WHITE);
        reg.set_theme_mode(ThemeMode::Dark);
        assert_eq!(reg.color("CardBackground"), Color::BLACK);
        assert!(reg.bundle().validate().is_ok());
    }

    #[test]
    fn color_for_other_scheme() {
        let reg = ThemeRegistry::headless();
        assert_eq!(
            reg.color_for_scheme(ColorToken::ApplicationPageBackgroundThemeBrush, ColorScheme::Dark)
                .to_rgba8(),
            [32, 32, 32, 255]
        );
    }

    #[test]
    fn accent_tokens_resolve_from_palette() {
        let mut reg = ThemeRegistry::headless();
        assert_eq!(reg.color(ColorToken::SystemAccentColor).to_rgba8(), [0, 120, 215, 255]);
        reg.set_accent_color(Color::from_rgb8(100, 100, 100));
        assert_eq!(
            reg.color(ColorToken::SystemAccentColorDark3).to_rgba8(),
            [40, 40, 40, 255]
        );
        assert_eq!(reg.mode(), ThemeMode::Auto);
    }

    #[test]
    fn listeners_receive_events() {
        let mut reg = ThemeRegistry::headless();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = reg.on_change(move |event| sink.borrow_mut().push(event.clone()));

        reg.set_theme_mode(ThemeMode::Dark);
        assert_eq!(
            *seen.borrow(),
            vec![
                ThemeEvent::SchemeChanged(ColorScheme::Dark),
                ThemeEvent::ModeChanged(ThemeMode::Dark)
            ]
        );

        assert!(reg.remove_listener(id));
        reg.set_theme_mode(ThemeMode::Light);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn preferences_roundtrip_through_registry() {
        let mut reg = ThemeRegistry::headless();
        reg.apply_preferences(&ThemePreferences {
            mode: ThemeMode::Dark,
            accent: Some("#ff8800".into()),
            transitions_enabled: false,
            transition_mode: TransitionMode::Fade,
        });
        assert!(reg.is_dark());
        assert!(!reg.transitions_enabled());
        assert_eq!(reg.transition_mode(), TransitionMode::Fade);

        let prefs = reg.preferences();
        assert_eq!(prefs.mode, ThemeMode::Dark);
        assert_eq!(prefs.accent.as_deref(), Some("#ff8800"));
    }

    #[test]
    fn malformed_accent_is_ignored() {
        let mut reg = ThemeRegistry::headless();
        reg.apply_preferences(&ThemePreferences {
            accent: Some("orange".into()),
            ..ThemePreferences::default()
        });
        assert_eq!(reg.accent_color(), default_accent());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut reg = ThemeRegistry::headless();
        reg.set_accent_color(Color::from_rgb8(1, 2, 3));
        reg.set_theme_mode(ThemeMode::Dark);
        reg.reset_to_default();
        assert_eq!(reg.mode(), ThemeMode::Auto);
        assert_eq!(reg.accent_color(), default_accent());
    }
}
