use image::{Rgba, RgbaImage};
use mica_acrylic::{
    AcrylicBackdrop, AcrylicConfig, AcrylicPreset, BackdropCapture, BackdropMode, BackgroundSource,
    MaterialType,
};
use mica_core::Rect;
use mica_paint::{PaintCommand, PaintContext};
use mica_platform::{Compositor, NativeHandle};
use mica_theme::{ColorScheme, ThemeRegistry};
use raw_window_handle::{RawWindowHandle, XlibWindowHandle};

/// Compositor that accepts a configurable set of materials and logs calls
#[derive(Default)]
struct RecordingCompositor {
    supported: Vec<MaterialType>,
    registered: Vec<MaterialType>,
    unregistered: usize,
}

impl RecordingCompositor {
    fn supporting(materials: &[MaterialType]) -> Self {
        Self {
            supported: materials.to_vec(),
            ..Self::default()
        }
    }
}

impl Compositor for RecordingCompositor {
    fn supports(&self, material: MaterialType) -> bool {
        self.supported.contains(&material)
    }

    fn register_backdrop(&mut self, _handle: NativeHandle, material: MaterialType) -> bool {
        if self.supports(material) {
            self.registered.push(material);
            true
        } else {
            false
        }
    }

    fn unregister_backdrop(&mut self, _handle: NativeHandle) -> bool {
        self.unregistered += 1;
        true
    }
}

/// Capture that has nothing to offer
struct NoCapture;

impl BackdropCapture for NoCapture {
    fn capture(&mut self, _source: BackgroundSource, _w: u32, _h: u32) -> Option<RgbaImage> {
        None
    }
}

/// Capture that only has host (desktop) content
struct HostOnlyCapture;

impl BackdropCapture for HostOnlyCapture {
    fn capture(&mut self, source: BackgroundSource, w: u32, h: u32) -> Option<RgbaImage> {
        (source == BackgroundSource::HostBackdrop)
            .then(|| RgbaImage::from_pixel(w, h, Rgba([0, 0, 0, 255])))
    }
}

fn backdrop() -> AcrylicBackdrop {
    AcrylicBackdrop::new(AcrylicConfig::default(), &ThemeRegistry::headless())
}

fn handle() -> Option<NativeHandle> {
    Some(RawWindowHandle::Xlib(XlibWindowHandle::new(7)))
}

#[test]
fn native_backdrop_is_used_when_accepted() {
    let mut compositor = RecordingCompositor::supporting(&[MaterialType::Acrylic]);
    let mut backdrop = backdrop();

    assert!(backdrop.enable_blur(&mut compositor, handle(), MaterialType::Acrylic));
    assert_eq!(backdrop.mode(), BackdropMode::Native(MaterialType::Acrylic));

    // The compositor paints; the widget draws nothing
    let mut ctx = PaintContext::new();
    backdrop.paint(&mut ctx, Rect::new(0.0, 0.0, 20.0, 20.0), 8.0);
    assert!(ctx.commands().is_empty());
}

#[test]
fn mica_downgrades_to_acrylic() {
    let mut compositor = RecordingCompositor::supporting(&[MaterialType::Acrylic]);
    let mut backdrop = backdrop();

    assert!(backdrop.enable_blur(&mut compositor, handle(), MaterialType::Mica));
    assert_eq!(backdrop.requested_material(), MaterialType::Mica);
    assert_eq!(backdrop.mode(), BackdropMode::Native(MaterialType::Acrylic));
    assert_eq!(compositor.registered, vec![MaterialType::Acrylic]);
}

#[test]
fn refusal_falls_back_to_software() {
    let mut compositor = RecordingCompositor::default();
    let mut backdrop = backdrop();

    assert!(!backdrop.enable_blur(&mut compositor, handle(), MaterialType::Blur));
    assert_eq!(backdrop.mode(), BackdropMode::Software);

    let mut ctx = PaintContext::new();
    backdrop.paint(&mut ctx, Rect::new(0.0, 0.0, 10.0, 10.0), 4.0);
    assert!(ctx
        .commands()
        .iter()
        .any(|cmd| matches!(cmd, PaintCommand::DrawImage { .. })));
    assert_eq!(ctx.clip_depth(), 0);
}

#[test]
fn missing_handle_falls_back_to_software() {
    let mut compositor = RecordingCompositor::supporting(&[MaterialType::Acrylic]);
    let mut backdrop = backdrop();
    assert!(!backdrop.enable_blur(&mut compositor, None, MaterialType::Acrylic));
    assert_eq!(backdrop.mode(), BackdropMode::Software);
    assert!(compositor.registered.is_empty());
}

#[test]
fn disable_is_idempotent() {
    let mut compositor = RecordingCompositor::supporting(&[MaterialType::Acrylic]);
    let mut backdrop = backdrop();
    backdrop.enable_blur(&mut compositor, handle(), MaterialType::Acrylic);

    backdrop.disable_blur(&mut compositor);
    backdrop.disable_blur(&mut compositor);
    assert_eq!(compositor.unregistered, 1);
    assert_eq!(backdrop.mode(), BackdropMode::Flat);
    assert_eq!(backdrop.requested_material(), MaterialType::None);
}

#[test]
fn switching_material_unregisters_first() {
    let mut compositor =
        RecordingCompositor::supporting(&[MaterialType::Acrylic, MaterialType::Mica]);
    let mut backdrop = backdrop();
    backdrop.enable_blur(&mut compositor, handle(), MaterialType::Acrylic);
    backdrop.enable_blur(&mut compositor, handle(), MaterialType::Mica);
    assert_eq!(compositor.unregistered, 1);
    assert_eq!(backdrop.mode(), BackdropMode::Native(MaterialType::Mica));
}

#[test]
fn failed_capture_paints_fallback() {
    let mut compositor = RecordingCompositor::default();
    let mut backdrop = backdrop().with_capture(NoCapture);
    backdrop.enable_blur(&mut compositor, handle(), MaterialType::Acrylic);

    let mut ctx = PaintContext::new();
    backdrop.paint(&mut ctx, Rect::new(0.0, 0.0, 10.0, 10.0), 4.0);
    assert_eq!(ctx.fill_colors(), vec![backdrop.config().fallback_color()]);
}

#[test]
fn preset_source_reaches_capture() {
    let registry = ThemeRegistry::headless();
    let mut dialog = AcrylicBackdrop::from_preset(AcrylicPreset::ContentDialog, &registry)
        .with_capture(HostOnlyCapture);
    assert!(dialog.composite(4, 4).is_some());

    let mut sidebar = AcrylicBackdrop::from_preset(AcrylicPreset::Sidebar, &registry)
        .with_capture(HostOnlyCapture);
    assert!(sidebar.composite(4, 4).is_none());
}

#[test]
fn preset_colors_ignore_theme_changes() {
    let mut registry = ThemeRegistry::headless();
    let mut backdrop = AcrylicBackdrop::from_preset(AcrylicPreset::Sidebar, &registry);
    let light = AcrylicPreset::Sidebar.config(ColorScheme::Light);
    registry.set_theme_mode(mica_theme::ThemeMode::Dark);
    backdrop.apply_theme(&registry);
    assert_eq!(backdrop.config().tint_color(), light.tint_color());
}
