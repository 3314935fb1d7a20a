//! Static text leaf.

use crate::backend::Backend;
use crate::device::Device;
use crate::geometry::{Alignment, Color, Rect};
use crate::tree::{Tree, Wid};

/// A line of text, aligned horizontally within its allocation and centered
/// vertically. Sizes itself to the measured text width and one cell height.
#[derive(Debug, Default)]
pub struct Text {
    pub text: String,
    pub align: Alignment,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        _tree: &mut Tree,
    ) -> Rect {
        Rect::new(
            allocation.x,
            allocation.y,
            dev.text_width(&self.text),
            dev.cell_height(),
        )
    }

    pub(crate) fn draw<B: Backend>(
        &self,
        dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        _tree: &mut Tree,
    ) {
        let x = match self.align {
            Alignment::Near => 0,
            Alignment::Center => allocation.width / 2 - dev.text_width(&self.text) / 2,
            Alignment::Far => allocation.width - dev.text_width(&self.text),
        };
        dev.draw_text(
            &self.text,
            x + allocation.x,
            (allocation.height / 2 - dev.cell_height() / 2) + allocation.y,
            self.color,
        );
    }
}
