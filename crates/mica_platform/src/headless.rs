//! Platform implementation for hosts without a compositor
//!
//! Refuses every backdrop and reports no system preferences unless told
//! otherwise. Used on non-Windows hosts, in CI and in tests.

use mica_core::Color;

use crate::appearance::{ColorScheme, SystemAppearance};
use crate::compositor::{Compositor, MaterialType, NativeHandle};

#[derive(Clone, Debug, Default)]
pub struct HeadlessPlatform {
    scheme: Option<ColorScheme>,
    accent: Option<Color>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a fixed system color scheme
    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Report a fixed system accent color
    pub fn with_accent_color(mut self, accent: Color) -> Self {
        self.accent = Some(accent);
        self
    }
}

impl Compositor for HeadlessPlatform {
    fn supports(&self, _material: MaterialType) -> bool {
        false
    }

    fn register_backdrop(&mut self, _handle: NativeHandle, material: MaterialType) -> bool {
        tracing::debug!(%material, "headless platform has no backdrop compositor");
        false
    }

    fn unregister_backdrop(&mut self, _handle: NativeHandle) -> bool {
        false
    }
}

impl SystemAppearance for HeadlessPlatform {
    fn color_scheme(&self) -> Option<ColorScheme> {
        self.scheme
    }

    fn accent_color(&self) -> Option<Color> {
        self.accent
    }

    fn subscribe(&mut self) -> bool {
        false
    }

    fn unsubscribe(&mut self) {}
}
