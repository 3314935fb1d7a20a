//! A retained-tree, immediate-draw widget toolkit.
//!
//! Widgets live in a flat arena ([`tree::Tree`]) addressed by opaque
//! identifiers and are composed into a tree by reference. Each frame runs
//! three passes over that tree: bounds resolution (top-down allocation of
//! rectangles), drawing (deferred commands accumulated into a [`device::Device`]
//! and flushed against a host-supplied [`backend::Backend`]), and event
//! routing (hit-tested mouse dispatch plus focus-targeted keyboard dispatch).
//!
//! Trees can be built programmatically with the per-kind builders, or
//! compiled from a declarative text format by [`markup::compile`]:
//!
//! ```
//! use patchkit::{AtlasMetrics, Device, RecordingBackend, Tree};
//! use patchkit::geometry::Rect;
//!
//! let mut dev = Device::new(RecordingBackend::new(800, 600), AtlasMetrics::uniform(8, 8));
//! let mut tree = Tree::new();
//! let root = patchkit::markup::compile(
//!     &mut tree,
//!     r#"Root(child: Container(background: true, child: Text(text: "hi")))"#,
//! )
//! .unwrap();
//!
//! tree.draw(&mut dev, root, Rect::default());
//! dev.flush();
//! assert!(!dev.backend().blits.is_empty());
//! ```
//!
//! Rendering is fully abstract: the toolkit emits glyph and nine-slice tile
//! blits against a themed 16×16 tile atlas (see [`atlas`] for decoding one
//! from an image) and never touches a GPU or window itself.

pub mod atlas;
pub mod backend;
pub mod device;
pub mod event;
pub mod geometry;
pub mod markup;
pub mod tree;
pub mod widgets;

pub use backend::{AtlasMetrics, Backend, RecordingBackend};
pub use device::Device;
pub use event::{
    EditCommand, EventResponse, Key, KeyboardEvent, MouseButton, MouseEvent, MouseEventKind,
};
pub use geometry::{Alignment, Color, Rect};
pub use tree::{Tree, Wid};
pub use widgets::{
    Button, ButtonState, Column, Container, Input, Layout, Placement, Root, Slider, Text, Widget,
    WidgetKind,
};
