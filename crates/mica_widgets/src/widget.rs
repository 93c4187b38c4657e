//! Widget identity and the host toolkit contract

use mica_core::{Point, Rect};
use mica_platform::NativeHandle;
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::themed::ThemedWidget;

new_key_type! {
    pub struct WidgetId;
}

/// Child list returned by [`WidgetHost::children`]
pub type Children = SmallVec<[WidgetId; 8]>;

/// What the engine needs from the retained widget tree of the host toolkit.
///
/// All rectangles and points are in one global coordinate space (window or
/// screen coordinates). Widgets that are not themed return `None` from
/// [`themed`](WidgetHost::themed) but are still walked through.
pub trait WidgetHost {
    /// Current children of `id`, in paint order
    fn children(&self, id: WidgetId) -> Children;

    /// Bounds of `id` in global coordinates, `None` once it is gone
    fn global_bounds(&self, id: WidgetId) -> Option<Rect>;

    /// Hidden widgets, and everything under them, are skipped
    fn is_visible(&self, id: WidgetId) -> bool {
        let _ = id;
        true
    }

    fn themed(&self, id: WidgetId) -> Option<&ThemedWidget>;

    fn themed_mut(&mut self, id: WidgetId) -> Option<&mut ThemedWidget>;

    /// Schedule a repaint of `id`
    fn request_repaint(&mut self, id: WidgetId);

    /// Last known pointer position in global coordinates
    fn pointer_position(&self) -> Option<Point> {
        None
    }

    /// Native window handle, once the widget has been realized
    fn native_handle(&self, id: WidgetId) -> Option<NativeHandle> {
        let _ = id;
        None
    }

    fn map_to_global(&self, id: WidgetId, local: Point) -> Option<Point> {
        self.global_bounds(id).map(|b| local + b.origin)
    }

    fn map_from_global(&self, id: WidgetId, global: Point) -> Option<Point> {
        self.global_bounds(id).map(|b| global - b.origin)
    }
}

/// Depth-first walk of the visible subtree rooted at `root`, root first.
///
/// The walk uses the host's live child lists, so widgets removed since the
/// last call are simply not visited.
pub fn visible_subtree<H: WidgetHost + ?Sized>(host: &H, root: WidgetId) -> Vec<WidgetId> {
    walk(host, root, true)
}

/// Like [`visible_subtree`], including hidden widgets
pub fn subtree<H: WidgetHost + ?Sized>(host: &H, root: WidgetId) -> Vec<WidgetId> {
    walk(host, root, false)
}

fn walk<H: WidgetHost + ?Sized>(host: &H, root: WidgetId, visible_only: bool) -> Vec<WidgetId> {
    let mut out = Vec::new();
    let mut stack: Children = SmallVec::new();
    stack.push(root);

    while let Some(id) = stack.pop() {
        if host.global_bounds(id).is_none() || (visible_only && !host.is_visible(id)) {
            continue;
        }
        out.push(id);
        // Reverse so the first child is visited first
        stack.extend(host.children(id).into_iter().rev());
    }
    out
}
