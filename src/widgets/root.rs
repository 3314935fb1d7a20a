//! The tree's entry point. Always occupies the full viewport.

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, MouseEvent};
use crate::geometry::Rect;
use crate::tree::{Tree, Wid};

/// Root of a widget tree. Its rectangle is the viewport; the optional child
/// receives the whole of it.
#[derive(Debug, Default)]
pub struct Root {
    pub child: Option<Wid>,
}

impl Root {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: Wid) -> Self {
        self.child = Some(child);
        self
    }

    fn viewport_rect<B: Backend>(dev: &Device<B>) -> Rect {
        let (w, h) = dev.viewport();
        Rect::new(0, 0, w, h)
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) -> Rect {
        let bounds = Self::viewport_rect(dev);
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
        _allocation: Rect,
        tree: &mut Tree,
    ) -> EventResponse {
        match self.child {
            Some(child) => {
                let bounds = Self::viewport_rect(dev);
                tree.route_mouse(dev, event, child, bounds)
            }
            None => EventResponse::Ignored,
        }
    }
}
