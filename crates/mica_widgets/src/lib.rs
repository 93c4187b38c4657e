//! Mica Widgets
//!
//! The themed widget base and the animated theme transition engine.
//!
//! - [`WidgetHost`]: what the engine needs from the host toolkit's tree
//! - [`ThemedWidget`]: per-widget background, transition state and content
//! - [`TransitionDriver`]: ripple and fade transitions across a whole tree,
//!   driven by one shared frame timer
//! - [`WidgetTree`]: a reference host for headless use and tests
//!
//! # Example
//!
//! ```rust
//! use mica_animation::{ManualTimer, FRAME_INTERVAL};
//! use mica_core::{Point, Rect};
//! use mica_theme::{ThemeRegistry, TransitionMode};
//! use mica_widgets::{ThemedWidget, TransitionDriver, WidgetTree};
//!
//! let mut theme = ThemeRegistry::headless();
//! let mut tree = WidgetTree::new();
//! let root = tree.insert_root(Rect::new(0.0, 0.0, 400.0, 300.0), Some(ThemedWidget::new()));
//!
//! let mut driver = TransitionDriver::new(ManualTimer::new());
//! let from = theme.scheme();
//! driver.start_transition(&mut tree, &theme, root, TransitionMode::Ripple, Some(Point::new(50.0, 50.0)));
//!
//! while driver.tick(&mut tree, &mut theme, FRAME_INTERVAL) {}
//! assert_eq!(theme.scheme(), from.toggle());
//! ```

pub mod backdrop;
pub mod driver;
pub mod paintable;
pub mod themed;
pub mod transition;
pub mod tree;
pub mod widget;

pub use backdrop::{disable_blur, enable_blur, tick_backdrops};
pub use driver::{broadcast_theme_changed, switch_theme, TransitionDriver};
pub use paintable::Paintable;
pub use themed::ThemedWidget;
pub use transition::{TransitionFrame, TransitionState};
pub use tree::WidgetTree;
pub use widget::{subtree, visible_subtree, Children, WidgetHost, WidgetId};
