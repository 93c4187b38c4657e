//! Control painting contract

use mica_core::Rect;
use mica_paint::PaintSurface;
use mica_theme::ThemeRegistry;

use crate::transition::TransitionState;

/// Content painted by a control on top of its themed background.
///
/// `rect` is the widget's local rectangle. During a transition `transition`
/// carries the shared frame values, so controls can blend their own colors
/// the same way the background does.
pub trait Paintable {
    fn paint(
        &mut self,
        surface: &mut dyn PaintSurface,
        theme: &ThemeRegistry,
        transition: &TransitionState,
        rect: Rect,
    );

    /// Called after the theme changed, outside of any running transition
    fn theme_changed(&mut self, theme: &ThemeRegistry) {
        let _ = theme;
    }
}
