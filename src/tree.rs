//! Widget arena and pass dispatch.
//!
//! Widgets live in a flat arena keyed by [`Wid`] and reference each other
//! only through identifiers, so there is no parent pointer and no ownership
//! cycle. The tree drives the three recursive passes (bounds resolution,
//! drawing, mouse routing) plus focus-targeted keyboard dispatch.
//!
//! During a recursive pass the current widget is temporarily moved out of
//! its slot so both the widget and the arena can be borrowed mutably; a
//! widget that is already checked out (or was never created) behaves as
//! absent, which makes dangling and self-referential identifiers a no-op
//! instead of an error.

use std::collections::HashMap;
use std::num::NonZeroU32;

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, KeyboardEvent, MouseEvent};
use crate::geometry::Rect;
use crate::widgets::{Widget, WidgetKind};

/// Opaque widget identifier. Identifiers are issued monotonically starting
/// at one and never reused; "no widget" is expressed as `Option<Wid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wid(NonZeroU32);

impl Wid {
    fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Wid)
    }

    pub fn raw(self) -> u32 {
        self.0.get()
    }
}

/// The widget store: arena, bounds map, name index, and the focus target.
pub struct Tree {
    widgets: HashMap<Wid, Option<Widget>>,
    bounds: HashMap<Wid, Rect>,
    names: HashMap<String, Wid>,
    focused: Option<Wid>,
    next: u32,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            widgets: HashMap::new(),
            bounds: HashMap::new(),
            names: HashMap::new(),
            focused: None,
            next: 1,
        }
    }

    /// Store a widget and return its freshly issued identifier.
    pub fn create<W: Into<Widget>>(&mut self, widget: W) -> Wid {
        let wid = Wid::new(self.next).expect("identifier counter starts at one");
        self.next += 1;
        self.widgets.insert(wid, Some(widget.into()));
        wid
    }

    /// Store a widget under a name for later lookup. A repeated name rebinds
    /// to the newer widget.
    pub fn create_named<W: Into<Widget>>(&mut self, name: &str, widget: W) -> Wid {
        let wid = self.create(widget);
        self.names.insert(name.to_string(), wid);
        wid
    }

    /// Identifier bound to a name, if any.
    pub fn wid(&self, name: &str) -> Option<Wid> {
        self.names.get(name).copied()
    }

    /// Typed lookup. Absent identifiers and kind mismatches both yield
    /// `None`.
    pub fn get<K: WidgetKind>(&self, wid: Wid) -> Option<&K> {
        self.widgets.get(&wid)?.as_ref().and_then(K::from_ref)
    }

    pub fn get_mut<K: WidgetKind>(&mut self, wid: Wid) -> Option<&mut K> {
        self.widgets.get_mut(&wid)?.as_mut().and_then(K::from_mut)
    }

    pub fn get_named<K: WidgetKind>(&self, name: &str) -> Option<&K> {
        self.get(self.wid(name)?)
    }

    pub fn get_named_mut<K: WidgetKind>(&mut self, name: &str) -> Option<&mut K> {
        let wid = self.wid(name)?;
        self.get_mut(wid)
    }

    /// Last-computed bounds; a zero rectangle before the first layout pass.
    pub fn bounds_of(&self, wid: Wid) -> Rect {
        self.bounds.get(&wid).copied().unwrap_or_default()
    }

    pub fn set_bounds(&mut self, wid: Wid, bounds: Rect) {
        self.bounds.insert(wid, bounds);
    }

    pub fn focus(&self) -> Option<Wid> {
        self.focused
    }

    pub fn set_focus(&mut self, wid: Option<Wid>) {
        self.focused = wid;
    }

    /// The most recently issued identifier.
    pub fn newest(&self) -> Option<Wid> {
        Wid::new(self.next.saturating_sub(1))
    }

    fn take(&mut self, wid: Wid) -> Option<Widget> {
        self.widgets.get_mut(&wid)?.take()
    }

    fn put_back(&mut self, wid: Wid, widget: Widget) {
        if let Some(slot) = self.widgets.get_mut(&wid) {
            *slot = Some(widget);
        }
    }

    /// Recursively compute and store bounds for `wid` and everything below
    /// it, from the inbound allocation. Returns the widget's own rectangle.
    pub fn resolve_bounds<B: Backend>(
        &mut self,
        dev: &mut Device<B>,
        wid: Wid,
        allocation: Rect,
    ) -> Rect {
        let Some(widget) = self.take(wid) else {
            return Rect::default();
        };
        let bounds = widget.resolve_bounds(dev, wid, allocation, self);
        self.put_back(wid, widget);
        self.bounds.insert(wid, bounds);
        bounds
    }

    /// Recursively emit draw commands for `wid` using previously computed
    /// bounds. Drawing the newest widget first runs a bounds pass, so a tree
    /// extended since the last layout lays itself out before it paints.
    pub fn draw<B: Backend>(&mut self, dev: &mut Device<B>, wid: Wid, allocation: Rect) {
        if self.newest() == Some(wid) {
            self.resolve_bounds(dev, wid, allocation);
        }
        if let Some(widget) = self.take(wid) {
            widget.draw(dev, wid, allocation, self);
            self.put_back(wid, widget);
        }
    }

    /// Route a pointer event down the tree. Stops at the first widget that
    /// reports the event handled.
    pub fn route_mouse<B: Backend>(
        &mut self,
        dev: &mut Device<B>,
        event: &MouseEvent,
        wid: Wid,
        allocation: Rect,
    ) -> EventResponse {
        let Some(mut widget) = self.take(wid) else {
            return EventResponse::Ignored;
        };
        let response = widget.on_mouse(dev, event, wid, allocation, self);
        self.put_back(wid, widget);
        response
    }

    /// Deliver a keyboard event to the focused widget, if any.
    pub fn route_keyboard<B: Backend>(&mut self, dev: &mut Device<B>, event: &KeyboardEvent) {
        let Some(wid) = self.focused else {
            return;
        };
        if let Some(mut widget) = self.take(wid) {
            widget.on_key(dev, event, wid, self);
            self.put_back(wid, widget);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AtlasMetrics, RecordingBackend};
    use crate::widgets::{Button, Container, Root, Text};

    fn device() -> Device<RecordingBackend> {
        Device::new(RecordingBackend::new(800, 600), AtlasMetrics::uniform(8, 8))
    }

    #[test]
    fn test_identifiers_are_monotonic() {
        let mut tree = Tree::new();
        let a = tree.create(Text::new("a"));
        let b = tree.create(Text::new("b"));
        assert_eq!(a.raw(), 1);
        assert_eq!(b.raw(), 2);
        assert_eq!(tree.newest(), Some(b));
    }

    #[test]
    fn test_typed_lookup_checks_the_kind() {
        let mut tree = Tree::new();
        let t = tree.create(Text::new("a"));
        assert!(tree.get::<Text>(t).is_some());
        assert!(tree.get::<Button>(t).is_none());
    }

    #[test]
    fn test_named_lookup() {
        let mut tree = Tree::new();
        let b = tree.create_named("ok", Button::new("OK"));
        assert_eq!(tree.wid("ok"), Some(b));
        assert_eq!(tree.get_named::<Button>("ok").unwrap().text, "OK");
        assert!(tree.get_named::<Button>("missing").is_none());

        tree.get_named_mut::<Button>("ok").unwrap().text = "GO".into();
        assert_eq!(tree.get_named::<Button>("ok").unwrap().text, "GO");
    }

    #[test]
    fn test_bounds_default_to_zero_before_layout() {
        let mut tree = Tree::new();
        let t = tree.create(Text::new("a"));
        assert_eq!(tree.bounds_of(t), Rect::default());
    }

    #[test]
    fn test_bounds_persist_between_passes() {
        let mut dev = device();
        let mut tree = Tree::new();
        let c = tree.create(Container::new().size(10, 10));
        let orphan = tree.create(Text::new("x"));

        tree.resolve_bounds(&mut dev, orphan, Rect::new(1, 2, 100, 100));
        let stale = tree.bounds_of(orphan);
        tree.resolve_bounds(&mut dev, c, Rect::new(0, 0, 100, 100));
        // the orphan was not reachable this pass, its bounds stay stale
        assert_eq!(tree.bounds_of(orphan), stale);
    }

    #[test]
    fn test_drawing_newest_widget_triggers_layout() {
        let mut dev = device();
        let mut tree = Tree::new();
        let child = tree.create(Container::new().size(64, 32));
        let root = tree.create(Root::new().child(child));

        // no explicit resolve_bounds call before drawing
        tree.draw(&mut dev, root, Rect::default());
        assert_eq!(tree.bounds_of(root), Rect::new(0, 0, 800, 600));
        assert_eq!(tree.bounds_of(child), Rect::new(0, 0, 64, 32));
    }

    #[test]
    fn test_self_referential_child_is_a_no_op() {
        let mut dev = device();
        let mut tree = Tree::new();
        let c = tree.create(Container::new());
        tree.get_mut::<Container>(c).unwrap().child = Some(c);

        // the cycle resolves as an absent child instead of recursing forever
        let bounds = tree.resolve_bounds(&mut dev, c, Rect::new(0, 0, 50, 50));
        assert_eq!(bounds, Rect::new(0, 0, 50, 50));
    }

    #[test]
    fn test_keyboard_goes_nowhere_without_focus() {
        let mut dev = device();
        let mut tree = Tree::new();
        tree.create(Text::new("a"));
        // must not panic or mutate anything
        tree.route_keyboard(&mut dev, &KeyboardEvent::TextType('x'));
    }
}
