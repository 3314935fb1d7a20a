//! Border layout: five optional slots carving a shared rectangle.
//!
//! The four directional slots are processed in a fixed order (top, bottom,
//! left, right); each carves a strip off its edge sized to the child's own
//! measured extent, and the center slot receives whatever budget remains.
//! Carving is two-phase per child: measure at the full allocation, then
//! re-resolve at the carved strip.

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, MouseEvent};
use crate::geometry::Rect;
use crate::tree::{Tree, Wid};

const CARVE_SPACING: i32 = -1;

#[derive(Debug, Clone, Copy)]
enum Side {
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

/// Remaining edge budget while carving.
struct Budget {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl Budget {
    fn seed(rect: Rect) -> Self {
        Self {
            left: rect.x,
            right: rect.x + rect.width,
            top: rect.y,
            bottom: rect.y + rect.height,
        }
    }

    /// Carve a strip for a child whose measured rect is `measured`; shrinks
    /// the budget along the carve axis by the child's extent plus spacing.
    fn carve(&mut self, measured: Rect, side: Side) -> Rect {
        let mut rect = measured;
        match side {
            Side::Top => {
                rect.x = self.left;
                rect.y = self.top;
                rect.width = self.right - self.left;
                self.top += measured.height + CARVE_SPACING;
            }
            Side::Bottom => {
                rect.x = self.left;
                rect.y = self.bottom - measured.height;
                rect.width = self.right - self.left;
                self.bottom -= measured.height + CARVE_SPACING;
            }
            Side::Left => {
                rect.x = self.left;
                rect.y = self.top;
                rect.height = self.bottom - self.top;
                self.left += measured.width + CARVE_SPACING;
            }
            Side::Right => {
                rect.x = self.right - measured.width;
                rect.y = self.top;
                rect.height = self.bottom - self.top;
                self.right -= measured.width + CARVE_SPACING;
            }
            Side::Center => {
                rect.x = self.left;
                rect.y = self.top;
                rect.width = self.right - self.left;
                rect.height = self.bottom - self.top;
            }
        }
        rect
    }
}

/// Five-slot border layout.
#[derive(Debug, Default)]
pub struct Layout {
    pub top: Option<Wid>,
    pub bottom: Option<Wid>,
    pub left: Option<Wid>,
    pub right: Option<Wid>,
    pub center: Option<Wid>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(mut self, child: Wid) -> Self {
        self.top = Some(child);
        self
    }

    pub fn bottom(mut self, child: Wid) -> Self {
        self.bottom = Some(child);
        self
    }

    pub fn left(mut self, child: Wid) -> Self {
        self.left = Some(child);
        self
    }

    pub fn right(mut self, child: Wid) -> Self {
        self.right = Some(child);
        self
    }

    pub fn center(mut self, child: Wid) -> Self {
        self.center = Some(child);
        self
    }

    fn slots(&self) -> [(Option<Wid>, Side); 5] {
        [
            (self.top, Side::Top),
            (self.bottom, Side::Bottom),
            (self.left, Side::Left),
            (self.right, Side::Right),
            (self.center, Side::Center),
        ]
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        tree: &mut Tree,
    ) -> Rect {
        let mut budget = Budget::seed(allocation);
        for (slot, side) in self.slots() {
            if let Some(child) = slot {
                tree.resolve_bounds(dev, child, allocation);
                let measured = tree.bounds_of(child);
                let carved = budget.carve(measured, side);
                tree.resolve_bounds(dev, child, carved);
            }
        }
        allocation
    }

    pub(crate) fn draw<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) {
        for (slot, _) in self.slots() {
            if let Some(child) = slot {
                let bounds = tree.bounds_of(child);
                tree.draw(dev, child, bounds);
            }
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
        for (slot, _) in self.slots() {
            if let Some(child) = slot {
                let bounds = tree.bounds_of(child);
                if tree.route_mouse(dev, event, child, bounds).is_handled() {
                    return EventResponse::Handled;
                }
            }
        }
        EventResponse::Ignored
    }
}
