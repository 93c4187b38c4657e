//! Reference retained widget tree
//!
//! A minimal [`WidgetHost`] for headless hosts and tests: nodes with a rect
//! relative to their parent, visibility, optional themed state and an
//! optional native handle. Repaint requests are collected rather than
//! executed.

use mica_core::{Point, Rect};
use mica_paint::PaintSurface;
use mica_platform::NativeHandle;
use mica_theme::ThemeRegistry;
use rustc_hash::FxHashSet;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::themed::ThemedWidget;
use crate::widget::{Children, WidgetHost, WidgetId};

struct Node {
    parent: Option<WidgetId>,
    children: SmallVec<[WidgetId; 4]>,
    /// Relative to the parent (global for roots)
    rect: Rect,
    visible: bool,
    themed: Option<ThemedWidget>,
    handle: Option<NativeHandle>,
}

#[derive(Default)]
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Node>,
    pointer: Option<Point>,
    dirty: FxHashSet<WidgetId>,
    repaint_requests: usize,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level widget; `rect` is global
    pub fn insert_root(&mut self, rect: Rect, themed: Option<ThemedWidget>) -> WidgetId {
        self.nodes.insert(Node {
            parent: None,
            children: SmallVec::new(),
            rect,
            visible: true,
            themed,
            handle: None,
        })
    }

    /// Add a child; `rect` is relative to `parent`. `None` if `parent` is gone.
    pub fn insert_child(
        &mut self,
        parent: WidgetId,
        rect: Rect,
        themed: Option<ThemedWidget>,
    ) -> Option<WidgetId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.nodes.insert(Node {
            parent: Some(parent),
            children: SmallVec::new(),
            rect,
            visible: true,
            themed,
            handle: None,
        });
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(id);
        }
        Some(id)
    }

    /// Remove `id` and its whole subtree
    pub fn remove(&mut self, id: WidgetId) {
        let Some(parent) = self.nodes.get(id).map(|n| n.parent) else {
            return;
        };
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
            self.dirty.remove(&next);
        }
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Rect relative to the parent
    pub fn rect(&self, id: WidgetId) -> Option<Rect> {
        self.nodes.get(id).map(|n| n.rect)
    }

    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.rect = rect;
        }
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.visible = visible;
        }
    }

    pub fn set_native_handle(&mut self, id: WidgetId, handle: Option<NativeHandle>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.handle = handle;
        }
    }

    /// Record a pointer position (global). Themed widgets under it get it as
    /// their last pointer in local coordinates.
    pub fn set_pointer_position(&mut self, global: Point) {
        self.pointer = Some(global);
        let hits: Vec<(WidgetId, Point)> = self
            .nodes
            .keys()
            .filter_map(|id| {
                let bounds = self.global_bounds(id)?;
                bounds.contains(global).then(|| (id, global - bounds.origin))
            })
            .collect();
        for (id, local) in hits {
            if let Some(themed) = self.themed_mut(id) {
                themed.set_last_pointer(local);
            }
        }
    }

    /// Drain the widgets that asked for a repaint
    pub fn take_dirty(&mut self) -> FxHashSet<WidgetId> {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self, id: WidgetId) -> bool {
        self.dirty.contains(&id)
    }

    /// Total repaint requests received
    pub fn repaint_requests(&self) -> usize {
        self.repaint_requests
    }

    /// Paint one widget in its local coordinates
    pub fn paint(&mut self, id: WidgetId, surface: &mut dyn PaintSurface, theme: &ThemeRegistry) {
        let Some(bounds) = self.global_bounds(id) else {
            return;
        };
        if let Some(themed) = self.themed_mut(id) {
            themed.paint(surface, theme, bounds);
        }
    }
}

impl WidgetHost for WidgetTree {
    fn children(&self, id: WidgetId) -> Children {
        self.nodes
            .get(id)
            .map(|n| n.children.iter().copied().collect())
            .unwrap_or_default()
    }

    fn global_bounds(&self, id: WidgetId) -> Option<Rect> {
        let mut node = self.nodes.get(id)?;
        let mut rect = node.rect;
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            rect = rect.translate(node.rect.x(), node.rect.y());
        }
        Some(rect)
    }

    fn is_visible(&self, id: WidgetId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.visible)
    }

    fn themed(&self, id: WidgetId) -> Option<&ThemedWidget> {
        self.nodes.get(id)?.themed.as_ref()
    }

    fn themed_mut(&mut self, id: WidgetId) -> Option<&mut ThemedWidget> {
        self.nodes.get_mut(id)?.themed.as_mut()
    }

    fn request_repaint(&mut self, id: WidgetId) {
        self.repaint_requests += 1;
        self.dirty.insert(id);
    }

    fn pointer_position(&self) -> Option<Point> {
        self.pointer
    }

    fn native_handle(&self, id: WidgetId) -> Option<NativeHandle> {
        self.nodes.get(id)?.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::visible_subtree;

    #[test]
    fn global_bounds_accumulate_offsets() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Rect::new(10.0, 20.0, 400.0, 300.0), None);
        let a = tree.insert_child(root, Rect::new(5.0, 5.0, 100.0, 100.0), None).unwrap();
        let b = tree.insert_child(a, Rect::new(1.0, 2.0, 10.0, 10.0), None).unwrap();
        assert_eq!(tree.global_bounds(b), Some(Rect::new(16.0, 27.0, 10.0, 10.0)));
        assert_eq!(tree.map_from_global(b, Point::new(16.0, 27.0)), Some(Point::ZERO));
    }

    #[test]
    fn remove_drops_subtree() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Rect::new(0.0, 0.0, 10.0, 10.0), None);
        let a = tree.insert_child(root, Rect::new(0.0, 0.0, 5.0, 5.0), None).unwrap();
        let b = tree.insert_child(a, Rect::new(0.0, 0.0, 2.0, 2.0), None).unwrap();
        tree.remove(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn walk_is_depth_first_and_skips_hidden() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Rect::new(0.0, 0.0, 10.0, 10.0), None);
        let a = tree.insert_child(root, Rect::new(0.0, 0.0, 5.0, 5.0), None).unwrap();
        let a1 = tree.insert_child(a, Rect::new(0.0, 0.0, 1.0, 1.0), None).unwrap();
        let b = tree.insert_child(root, Rect::new(5.0, 0.0, 5.0, 5.0), None).unwrap();
        let b1 = tree.insert_child(b, Rect::new(0.0, 0.0, 1.0, 1.0), None).unwrap();
        assert_eq!(visible_subtree(&tree, root), vec![root, a, a1, b, b1]);

        tree.set_visible(b, false);
        assert_eq!(visible_subtree(&tree, root), vec![root, a, a1]);
    }

    #[test]
    fn pointer_reaches_themed_widgets() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(Rect::new(100.0, 100.0, 50.0, 50.0), Some(ThemedWidget::new()));
        tree.set_pointer_position(Point::new(110.0, 120.0));
        assert_eq!(
            tree.themed(root).and_then(|w| w.last_pointer()),
            Some(Point::new(10.0, 20.0))
        );
    }
}
