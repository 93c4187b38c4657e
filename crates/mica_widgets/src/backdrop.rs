//! Acrylic backdrops on widgets of a host tree

use std::time::Duration;

use mica_platform::{Compositor, MaterialType};

use crate::widget::{visible_subtree, WidgetHost, WidgetId};

/// Request a native backdrop for the acrylic widget `id`, using the host's
/// native handle. `false` when the widget has no acrylic material or the
/// compositor refused (the widget then paints the software fallback).
pub fn enable_blur<H: WidgetHost + ?Sized>(
    host: &mut H,
    compositor: &mut dyn Compositor,
    id: WidgetId,
    material: MaterialType,
) -> bool {
    let handle = host.native_handle(id);
    let enabled = host
        .themed_mut(id)
        .and_then(|w| w.acrylic_mut())
        .map(|acrylic| acrylic.enable_blur(compositor, handle, material))
        .unwrap_or(false);
    host.request_repaint(id);
    enabled
}

/// Remove the backdrop from `id`. Idempotent.
pub fn disable_blur<H: WidgetHost + ?Sized>(
    host: &mut H,
    compositor: &mut dyn Compositor,
    id: WidgetId,
) {
    if let Some(acrylic) = host.themed_mut(id).and_then(|w| w.acrylic_mut()) {
        acrylic.disable_blur(compositor);
        host.request_repaint(id);
    }
}

/// Advance tint animations of every acrylic widget under `root`.
/// Returns `true` while any is still animating.
pub fn tick_backdrops<H: WidgetHost + ?Sized>(host: &mut H, root: WidgetId, dt: Duration) -> bool {
    let mut animating = false;
    for id in visible_subtree(host, root) {
        let Some(acrylic) = host.themed_mut(id).and_then(|w| w.acrylic_mut()) else {
            continue;
        };
        if acrylic.tick(dt) {
            animating |= acrylic.is_animating();
            host.request_repaint(id);
        }
    }
    animating
}
