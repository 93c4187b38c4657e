//! Backdrop compositor contract
//!
//! The compositor is the OS service that renders a blurred, tinted copy of
//! whatever lies behind a window. Everything here is best-effort: a `false`
//! return means "draw it yourself", never an error.

use std::fmt;

use raw_window_handle::RawWindowHandle;
use serde::{Deserialize, Serialize};

/// Handle of a realized native window
pub type NativeHandle = RawWindowHandle;

/// Backdrop material requested from the compositor
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    /// No backdrop; paint an opaque fill
    #[default]
    None,
    /// Plain blur-behind
    Blur,
    /// Blur with tint, luminosity and noise layers
    Acrylic,
    /// Desktop-wallpaper tinted material
    Mica,
    /// Stronger-tinted Mica variant for tabbed surfaces
    MicaAlt,
}

impl MaterialType {
    /// Whether this is one of the Mica family
    pub fn is_mica(&self) -> bool {
        matches!(self, MaterialType::Mica | MaterialType::MicaAlt)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialType::None => "none",
            MaterialType::Blur => "blur",
            MaterialType::Acrylic => "acrylic",
            MaterialType::Mica => "mica",
            MaterialType::MicaAlt => "micaalt",
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OS backdrop compositor
pub trait Compositor {
    /// Whether `material` can be registered at all on this system
    fn supports(&self, material: MaterialType) -> bool;

    /// Ask the compositor to draw `material` behind `handle`.
    ///
    /// Returns `false` when the request was refused; the caller falls back
    /// to painting.
    fn register_backdrop(&mut self, handle: NativeHandle, material: MaterialType) -> bool;

    /// Remove any backdrop from `handle`. Unregistering an unknown handle is a no-op.
    fn unregister_backdrop(&mut self, handle: NativeHandle) -> bool;
}
