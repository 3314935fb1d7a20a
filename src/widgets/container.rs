//! Fixed-size or fill-parent box with an optional background patch.
//!
//! A container is the only kind that clips: its child always draws inside a
//! scissor grown one pixel past the interior, so nine-slice borders stay
//! crisp at the edges.

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, MouseEvent};
use crate::geometry::Rect;
use crate::tree::{Tree, Wid};

const BACKGROUND_TILE: u8 = 6;
const DEFAULT_PADDING: i32 = 5;

/// A sized box. Non-positive `width`/`height` inherit the allocation's
/// dimension. When `background` is set the child is inset by `padding`;
/// without one the child gets the full rectangle.
#[derive(Debug)]
pub struct Container {
    pub width: i32,
    pub height: i32,
    pub child: Option<Wid>,
    pub padding: i32,
    pub background: bool,
}

impl Default for Container {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            child: None,
            padding: DEFAULT_PADDING,
            background: false,
        }
    }
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn child(mut self, child: Wid) -> Self {
        self.child = Some(child);
        self
    }

    pub fn padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    pub fn background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// The rectangle handed to the child: inset by `padding` only when a
    /// background is drawn.
    fn interior(&self, bounds: Rect) -> Rect {
        if self.background {
            bounds.inset(self.padding)
        } else {
            bounds
        }
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        tree: &mut Tree,
    ) -> Rect {
        let mut bounds = Rect::new(allocation.x, allocation.y, self.width, self.height);
        if self.width <= 0 {
            bounds.width = allocation.width;
        }
        if self.height <= 0 {
            bounds.height = allocation.height;
        }

        if let Some(child) = self.child {
            tree.resolve_bounds(dev, child, self.interior(bounds));
        }
        bounds
    }

    pub(crate) fn draw<B: Backend>(
        &self,
        dev: &mut Device<B>,
        wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) {
        let bounds = tree.bounds_of(wid);
        let interior = self.interior(bounds);

        if self.background {
            dev.draw_patch(BACKGROUND_TILE, bounds);
        }
        if let Some(child) = self.child {
            dev.clip(Rect::new(
                interior.x - 1,
                interior.y - 1,
                interior.width + 2,
                interior.height + 2,
            ));
            tree.draw(dev, child, interior);
            dev.unclip();
        }
    }

    pub(crate) fn on_mouse<B: Backend>(
        &mut self,
        dev: &mut Device<B>,
        event: &MouseEvent,
        _wid: Wid,
        allocation: Rect,
        tree: &mut Tree,
    ) -> EventResponse {
        let Some(child) = self.child else {
            return EventResponse::Ignored;
        };

        let interior = self.interior(allocation);
        if !interior.contains(event.x, event.y) {
            return EventResponse::Ignored;
        }
        tree.route_mouse(dev, event, child, interior)
    }
}
