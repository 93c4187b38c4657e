//! Built-in themes

pub mod winui;

pub use winui::{dark_tokens, light_tokens, winui_bundle};
