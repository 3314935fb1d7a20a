//! Fractional offset of a child within its allocation.

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, MouseEvent};
use crate::geometry::Rect;
use crate::tree::{Tree, Wid};

/// Shifts the inbound allocation by `(x, y)` fractions of its own size before
/// handing it to the child. The size itself is passed through unchanged.
#[derive(Debug, Default)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub child: Option<Wid>,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn child(mut self, child: Wid) -> Self {
        self.child = Some(child);
        self
    }

    fn offset(&self, allocation: Rect) -> Rect {
        Rect::new(
            allocation.x + (allocation.width as f32 * self.x) as i32,
            allocation.y + (allocation.height as f32 * self.y) as i32,
            allocation.width,
            allocation.height,
        )
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        tree: &mut Tree,
    ) -> Rect {
        let bounds = self.offset(allocation);
        if let Some(child) = self.child {
            tree.resolve_bounds(dev, child, bounds);
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
        if let Some(child) = self.child {
            tree.draw(dev, child, bounds);
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
        match self.child {
            Some(child) => tree.route_mouse(dev, event, child, self.offset(allocation)),
            None => EventResponse::Ignored,
        }
    }
}
