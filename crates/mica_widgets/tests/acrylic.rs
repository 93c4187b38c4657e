use std::time::Duration;

use mica_acrylic::{AcrylicBackdrop, AcrylicConfig, BackdropMode, MaterialType};
use mica_core::Rect;
use mica_platform::{Compositor, HeadlessPlatform, NativeHandle};
use mica_theme::ThemeRegistry;
use mica_widgets::{disable_blur, enable_blur, tick_backdrops, ThemedWidget, WidgetHost, WidgetTree};
use raw_window_handle::{RawWindowHandle, XlibWindowHandle};

/// Accepts everything
#[derive(Default)]
struct AcceptAll {
    live: usize,
}

impl Compositor for AcceptAll {
    fn supports(&self, _material: MaterialType) -> bool {
        true
    }

    fn register_backdrop(&mut self, _handle: NativeHandle, _material: MaterialType) -> bool {
        self.live += 1;
        true
    }

    fn unregister_backdrop(&mut self, _handle: NativeHandle) -> bool {
        self.live -= 1;
        true
    }
}

fn acrylic_tree() -> (WidgetTree, mica_widgets::WidgetId) {
    let theme = ThemeRegistry::headless();
    let backdrop = AcrylicBackdrop::new(AcrylicConfig::default(), &theme);
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(
        Rect::new(0.0, 0.0, 200.0, 100.0),
        Some(ThemedWidget::new().with_acrylic(backdrop, &theme)),
    );
    (tree, root)
}

fn mode(tree: &WidgetTree, id: mica_widgets::WidgetId) -> BackdropMode {
    tree.themed(id).and_then(|w| w.acrylic()).map(|a| a.mode()).unwrap()
}

#[test]
fn blur_uses_the_widget_handle() {
    let (mut tree, root) = acrylic_tree();
    let mut compositor = AcceptAll::default();

    // Not realized yet
    assert!(!enable_blur(&mut tree, &mut compositor, root, MaterialType::Mica));
    assert_eq!(mode(&tree, root), BackdropMode::Software);

    tree.set_native_handle(root, Some(RawWindowHandle::Xlib(XlibWindowHandle::new(3))));
    assert!(enable_blur(&mut tree, &mut compositor, root, MaterialType::Mica));
    assert_eq!(mode(&tree, root), BackdropMode::Native(MaterialType::Mica));
    assert_eq!(compositor.live, 1);

    disable_blur(&mut tree, &mut compositor, root);
    disable_blur(&mut tree, &mut compositor, root);
    assert_eq!(compositor.live, 0);
    assert_eq!(mode(&tree, root), BackdropMode::Flat);
}

#[test]
fn refused_blur_falls_back() {
    let (mut tree, root) = acrylic_tree();
    tree.set_native_handle(root, Some(RawWindowHandle::Xlib(XlibWindowHandle::new(3))));
    let mut compositor = HeadlessPlatform::new();
    assert!(!enable_blur(&mut tree, &mut compositor, root, MaterialType::Acrylic));
    assert_eq!(mode(&tree, root), BackdropMode::Software);
}

#[test]
fn widgets_without_acrylic_refuse() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(Rect::new(0.0, 0.0, 10.0, 10.0), Some(ThemedWidget::new()));
    let mut compositor = AcceptAll::default();
    assert!(!enable_blur(&mut tree, &mut compositor, root, MaterialType::Acrylic));
    assert_eq!(compositor.live, 0);
}

#[test]
fn tint_animations_tick_through_the_tree() {
    let (mut tree, root) = acrylic_tree();
    tree.themed_mut(root)
        .and_then(|w| w.acrylic_mut())
        .unwrap()
        .animate_tint_opacity(0.4, Duration::from_millis(66));

    assert!(tick_backdrops(&mut tree, root, Duration::from_millis(33)));
    assert!(!tick_backdrops(&mut tree, root, Duration::from_millis(33)));
    let opacity = tree
        .themed(root)
        .and_then(|w| w.acrylic())
        .map(|a| a.config().tint_opacity());
    assert_eq!(opacity, Some(0.4));
    assert!(tree.is_dirty(root));
}
