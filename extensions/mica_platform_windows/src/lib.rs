//! Mica Windows Platform
//!
//! The native backend for Windows 10 and 11:
//!
//! - Blur and Acrylic through `SetWindowCompositionAttribute` (Windows 10+)
//! - Mica and Mica Alt through the DWM system backdrop (Windows 11)
//! - Light/dark scheme from `AppsUseLightTheme`, accent from DWM colorization
//!
//! Everything is compiled only on Windows; other targets get an empty crate
//! and should use [`mica_platform::HeadlessPlatform`].

pub mod accent;

#[cfg(target_os = "windows")]
mod win32;

#[cfg(target_os = "windows")]
pub use win32::WindowsPlatform;

pub use accent::{AccentState, WINDOWS_11_BUILD};
