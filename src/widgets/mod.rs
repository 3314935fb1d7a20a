//! The closed set of widget kinds.
//!
//! Each kind lives in its own file and implements four operations dispatched
//! over the [`Widget`] sum type: bounds resolution, drawing, mouse routing,
//! and keyboard handling. Widgets reference each other only by
//! [`crate::tree::Wid`]; ownership lives in the [`crate::tree::Tree`] arena.

mod button;
mod column;
mod container;
mod input;
mod layout;
mod placement;
mod root;
mod slider;
mod text;

pub use button::{Button, ButtonState, PressCallback};
pub use column::Column;
pub use container::Container;
pub use input::{Input, INPUT_HEIGHT};
pub use layout::Layout;
pub use placement::Placement;
pub use root::Root;
pub use slider::{ChangeCallback, Slider, SLIDER_HEIGHT, SLIDER_THUMB_WIDTH};
pub use text::Text;

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, KeyboardEvent, MouseEvent};
use crate::geometry::Rect;
use crate::tree::{Tree, Wid};

/// A widget value: a closed, tagged union over the nine kinds.
pub enum Widget {
    Root(Root),
    Container(Container),
    Layout(Layout),
    Column(Column),
    Placement(Placement),
    Text(Text),
    Button(Button),
    Slider(Slider),
    Input(Input),
}

impl Widget {
    /// Canonical kind name, as recognized by the markup compiler.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Widget::Root(_) => Root::NAME,
            Widget::Container(_) => Container::NAME,
            Widget::Layout(_) => Layout::NAME,
            Widget::Column(_) => Column::NAME,
            Widget::Placement(_) => Placement::NAME,
            Widget::Text(_) => Text::NAME,
            Widget::Button(_) => Button::NAME,
            Widget::Slider(_) => Slider::NAME,
            Widget::Input(_) => Input::NAME,
        }
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        dev: &mut Device<B>,
        wid: Wid,
        allocation: Rect,
        tree: &mut Tree,
    ) -> Rect {
        match self {
            Widget::Root(w) => w.resolve_bounds(dev, wid, allocation, tree),
            Widget::Container(w) => w.resolve_bounds(dev, wid, allocation, tree),
            Widget::Layout(w) => w.resolve_bounds(dev, wid, allocation, tree),
            Widget::Column(w) => w.resolve_bounds(dev, wid, allocation, tree),
            Widget::Placement(w) => w.resolve_bounds(dev, wid, allocation, tree),
            Widget::Text(w) => w.resolve_bounds(dev, wid, allocation, tree),
            Widget::Button(w) => w.resolve_bounds(dev, wid, allocation, tree),
            Widget::Slider(w) => w.resolve_bounds(dev, wid, allocation, tree),
            Widget::Input(w) => w.resolve_bounds(dev, wid, allocation, tree),
        }
    }

    pub(crate) fn draw<B: Backend>(
        &self,
        dev: &mut Device<B>,
        wid: Wid,
        allocation: Rect,
        tree: &mut Tree,
    ) {
        match self {
            Widget::Root(w) => w.draw(dev, wid, allocation, tree),
            Widget::Container(w) => w.draw(dev, wid, allocation, tree),
            Widget::Layout(w) => w.draw(dev, wid, allocation, tree),
            Widget::Column(w) => w.draw(dev, wid, allocation, tree),
            Widget::Placement(w) => w.draw(dev, wid, allocation, tree),
            Widget::Text(w) => w.draw(dev, wid, allocation, tree),
            Widget::Button(w) => w.draw(dev, wid, allocation, tree),
            Widget::Slider(w) => w.draw(dev, wid, allocation, tree),
            Widget::Input(w) => w.draw(dev, wid, allocation, tree),
        }
    }

    pub(crate) fn on_mouse<B: Backend>(
        &mut self,
        dev: &mut Device<B>,
        event: &MouseEvent,
        wid: Wid,
        allocation: Rect,
        tree: &mut Tree,
    ) -> EventResponse {
        match self {
            Widget::Root(w) => w.on_mouse(dev, event, wid, allocation, tree),
            Widget::Container(w) => w.on_mouse(dev, event, wid, allocation, tree),
            Widget::Layout(w) => w.on_mouse(dev, event, wid, allocation, tree),
            Widget::Column(w) => w.on_mouse(dev, event, wid, allocation, tree),
            Widget::Placement(w) => w.on_mouse(dev, event, wid, allocation, tree),
            Widget::Text(_) => EventResponse::Ignored,
            Widget::Button(w) => w.on_mouse(dev, event, wid, allocation, tree),
            Widget::Slider(w) => w.on_mouse(dev, event, wid, allocation, tree),
            Widget::Input(w) => w.on_mouse(dev, event, wid, allocation, tree),
        }
    }

    pub(crate) fn on_key<B: Backend>(
        &mut self,
        dev: &mut Device<B>,
        event: &KeyboardEvent,
        wid: Wid,
        tree: &mut Tree,
    ) {
        // Only Input owns text-editing state; the other focusable kinds
        // react to the pointer alone.
        if let Widget::Input(w) = self {
            w.on_key(dev, event, wid, tree);
        }
    }
}

/// Typed extraction from the [`Widget`] sum, used by the store's typed
/// lookups (`Tree::get::<Button>(...)` and friends).
pub trait WidgetKind: Sized + Into<Widget> {
    /// Canonical kind name, matching the markup grammar.
    const NAME: &'static str;

    fn from_ref(widget: &Widget) -> Option<&Self>;
    fn from_mut(widget: &mut Widget) -> Option<&mut Self>;
}

macro_rules! widget_kind {
    ($kind:ident) => {
        impl From<$kind> for Widget {
            fn from(w: $kind) -> Widget {
                Widget::$kind(w)
            }
        }

        impl WidgetKind for $kind {
            const NAME: &'static str = stringify!($kind);

            fn from_ref(widget: &Widget) -> Option<&Self> {
                match widget {
                    Widget::$kind(w) => Some(w),
                    _ => None,
                }
            }

            fn from_mut(widget: &mut Widget) -> Option<&mut Self> {
                match widget {
                    Widget::$kind(w) => Some(w),
                    _ => None,
                }
            }
        }
    };
}

widget_kind!(Root);
widget_kind!(Container);
widget_kind!(Layout);
widget_kind!(Column);
widget_kind!(Placement);
widget_kind!(Text);
widget_kind!(Button);
widget_kind!(Slider);
widget_kind!(Input);
