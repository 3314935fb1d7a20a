//! Vertical stack with per-child horizontal alignment.

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, MouseEvent};
use crate::geometry::{Alignment, Rect};
use crate::tree::{Tree, Wid};

const DEFAULT_SPACING: i32 = 3;

/// Stacks children top to bottom, offsetting each by the cumulative height
/// (plus spacing) of its predecessors. Each child is measured first, then
/// placed horizontally by the column's alignment. The column's own height is
/// the sum of child heights and spacing.
#[derive(Debug)]
pub struct Column {
    pub children: Vec<Wid>,
    pub alignment: Alignment,
    pub spacing: i32,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            alignment: Alignment::Center,
            spacing: DEFAULT_SPACING,
        }
    }
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(mut self, child: Wid) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Wid>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, spacing: i32) -> Self {
        self.spacing = spacing;
        self
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        tree: &mut Tree,
    ) -> Rect {
        let mut y = 0;
        for &child in &self.children {
            // measure, then place with the measured width
            tree.resolve_bounds(
                dev,
                child,
                Rect::new(
                    allocation.x,
                    allocation.y + y,
                    allocation.width,
                    allocation.height,
                ),
            );
            let measured = tree.bounds_of(child);
            let x = match self.alignment {
                Alignment::Near => 0,
                Alignment::Center => allocation.width / 2 - measured.width / 2,
                Alignment::Far => allocation.width - measured.width,
            };
            tree.resolve_bounds(
                dev,
                child,
                Rect::new(
                    allocation.x + x,
                    allocation.y + y,
                    allocation.width,
                    allocation.height,
                ),
            );
            y += measured.height + self.spacing;
        }
        Rect::new(allocation.x, allocation.y, allocation.width, y)
    }

    pub(crate) fn draw<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) {
        for &child in &self.children {
            let bounds = tree.bounds_of(child);
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
        for &child in &self.children {
            let bounds = tree.bounds_of(child);
            if tree.route_mouse(dev, event, child, bounds).is_handled() {
                return EventResponse::Handled;
            }
        }
        EventResponse::Ignored
    }
}
