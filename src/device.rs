//! Deferred draw command buffer.
//!
//! Every drawing primitive is appended to an ordered command list tagged with
//! a strictly increasing sequence number; nothing is rasterized until
//! [`Device::flush`], which stable-sorts by sequence number and replays the
//! list against the backend, maintaining the clip-rectangle stack.
//!
//! The [`Device::push_order`]/[`Device::pop_order`] pair temporarily redirects
//! subsequent emissions to an arbitrary sequence base, so late content (the
//! slider's value balloon) can paint above everything emitted in tree order.

use crate::backend::{AtlasMetrics, Backend};
use crate::geometry::{Color, Rect};

const DEFAULT_CHAR_SPACING_X: i32 = -4;
const DEFAULT_CHAR_SPACING_Y: i32 = -2;
const DEFAULT_PATCH_PADDING: i32 = 5;

#[derive(Debug, Clone, Copy)]
enum CommandKind {
    Blit { src: Rect, dst: Rect, tint: Color },
    Clip(Rect),
    Unclip,
    Outline(Rect),
}

#[derive(Debug, Clone, Copy)]
struct Command {
    kind: CommandKind,
    order: i64,
}

/// Drawing device: command accumulation, glyph/patch emission helpers, and
/// the metrics of the themed tile atlas.
pub struct Device<B: Backend> {
    backend: B,
    metrics: AtlasMetrics,
    commands: Vec<Command>,
    order_stack: Vec<i64>,
    clip_stack: Vec<Rect>,
    current_order: i64,
    char_spacing_x: i32,
    char_spacing_y: i32,
    patch_padding: i32,
}

impl<B: Backend> Device<B> {
    pub fn new(backend: B, metrics: AtlasMetrics) -> Self {
        Self {
            backend,
            metrics,
            commands: Vec::new(),
            order_stack: Vec::new(),
            clip_stack: Vec::new(),
            current_order: 0,
            char_spacing_x: DEFAULT_CHAR_SPACING_X,
            char_spacing_y: DEFAULT_CHAR_SPACING_Y,
            patch_padding: DEFAULT_PATCH_PADDING,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn metrics(&self) -> &AtlasMetrics {
        &self.metrics
    }

    pub fn cell_width(&self) -> i32 {
        self.metrics.cell_width()
    }

    pub fn cell_height(&self) -> i32 {
        self.metrics.cell_height()
    }

    pub fn char_spacing_x(&self) -> i32 {
        self.char_spacing_x
    }

    pub fn set_char_spacing_x(&mut self, spacing: i32) {
        self.char_spacing_x = spacing;
    }

    pub fn char_spacing_y(&self) -> i32 {
        self.char_spacing_y
    }

    pub fn set_char_spacing_y(&mut self, spacing: i32) {
        self.char_spacing_y = spacing;
    }

    pub fn patch_padding(&self) -> i32 {
        self.patch_padding
    }

    pub fn set_patch_padding(&mut self, padding: i32) {
        self.patch_padding = padding;
    }

    pub fn viewport(&self) -> (i32, i32) {
        self.backend.viewport()
    }

    pub fn clipboard_text(&self) -> String {
        self.backend.clipboard_text()
    }

    /// Pixel width of a string: the atlas is monospaced per glyph slot, so
    /// width is glyph count times cell width plus inter-character spacing.
    pub fn text_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * (self.cell_width() + self.char_spacing_x)
    }

    fn push(&mut self, kind: CommandKind) {
        self.commands.push(Command {
            kind,
            order: self.current_order,
        });
        self.current_order += 1;
    }

    /// Emit one glyph at the pen position, tinted. Returns the pen advance.
    pub fn draw_char(&mut self, c: char, x: i32, y: i32, tint: Color) -> i32 {
        let glyph = (c as u32 & 0xFF) as u8;
        let cw = self.cell_width();
        let ch = self.cell_height();

        let sx = (glyph as i32 % 16) * cw;
        let sy = (glyph as i32 / 16) * ch;
        let (ox, oy) = self.metrics.offset(glyph);

        self.push(CommandKind::Blit {
            src: Rect::new(sx, sy, cw, ch),
            dst: Rect::new(x - ox, y + oy, cw, ch),
            tint,
        });

        self.metrics.advance(glyph) - ox
    }

    /// Emit a run of text. Newlines advance the pen one line down; other
    /// whitespace advances a full cell without emitting a glyph.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, tint: Color) {
        let mut tx = 0;
        let mut ty = 0;
        for c in text.chars() {
            if c == '\n' {
                tx = 0;
                ty += self.cell_height() + self.char_spacing_y;
            } else if c.is_whitespace() {
                tx += self.cell_width() + self.char_spacing_x;
            } else {
                tx += self.draw_char(c, tx + x, ty + y, tint);
            }
        }
    }

    /// Emit a sub-region of a themed tile stretched into `dst`.
    ///
    /// The sub-region `(rx, ry, rw, rh)` is in tile-local pixels; negative
    /// values wrap from the far edge of the cell, so `-p` addresses the last
    /// `p` pixels. Out-of-range values clamp to the cell.
    pub fn draw_tile_section(
        &mut self,
        index: u8,
        dst: Rect,
        tint: Color,
        rx: i32,
        ry: i32,
        rw: i32,
        rh: i32,
    ) {
        let cw = self.cell_width();
        let ch = self.cell_height();

        let rx = if rx > cw { cw } else { rx };
        let rx = if rx < 0 { cw + rx } else { rx };
        let ry = if ry > ch { ch } else { ry };
        let ry = if ry < 0 { ch + ry } else { ry };
        let rw = if rw < 0 { cw + rw } else { rw };
        let rh = if rh < 0 { ch + rh } else { rh };
        let rw = rw.clamp(0, cw);
        let rh = rh.clamp(0, ch);

        let sx = (index as i32 % 16) * cw;
        let sy = (index as i32 / 16) * ch;

        self.push(CommandKind::Blit {
            src: Rect::new(sx + rx, sy + ry, rw, rh),
            dst,
            tint,
        });
    }

    /// Emit a nine-slice "patch": four fixed corners, four edge beams
    /// stretched along one axis, one center stretched on both.
    pub fn draw_patch(&mut self, index: u8, rect: Rect) {
        self.draw_patch_tinted(index, rect, Color::WHITE);
    }

    pub fn draw_patch_tinted(&mut self, index: u8, rect: Rect, tint: Color) {
        let p = self.patch_padding;
        let Rect {
            x,
            y,
            width: w,
            height: h,
        } = rect;

        // corners
        self.draw_tile_section(index, Rect::new(x, y, p, p), tint, 0, 0, p, p);
        self.draw_tile_section(index, Rect::new(x + w - p, y, p, p), tint, -p, 0, p, p);
        self.draw_tile_section(index, Rect::new(x, y + h - p, p, p), tint, 0, -p, p, p);
        self.draw_tile_section(
            index,
            Rect::new(x + w - p, y + h - p, p, p),
            tint,
            -p,
            -p,
            p,
            p,
        );

        // beams
        self.draw_tile_section(
            index,
            Rect::new(x + p, y, w - p * 2, p),
            tint,
            p,
            0,
            -p * 2,
            p,
        );
        self.draw_tile_section(
            index,
            Rect::new(x + p, y + h - p, w - p * 2, p),
            tint,
            p,
            -p,
            -p * 2,
            p,
        );
        self.draw_tile_section(
            index,
            Rect::new(x, y + p, p, h - p * 2),
            tint,
            0,
            p,
            p,
            -p * 2,
        );
        self.draw_tile_section(
            index,
            Rect::new(x + w - p, y + p, p, h - p * 2),
            tint,
            -p,
            p,
            p,
            -p * 2,
        );

        // middle
        self.draw_tile_section(
            index,
            Rect::new(x + p, y + p, w - p * 2, h - p * 2),
            tint,
            p,
            p,
            -p * 2,
            -p * 2,
        );
    }

    /// Emit the two-patch speech-bubble used for the slider's value tooltip:
    /// a body centered on `x` and a tail pointing up at the thumb.
    pub fn draw_balloon(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.draw_patch(8, Rect::new(x - width / 2, y + 4, width, height));
        self.draw_patch(
            9,
            Rect::new(
                x - self.cell_width() / 2,
                y - (self.cell_height() - 4),
                self.cell_width(),
                self.cell_height(),
            ),
        );
    }

    /// Push a clip rectangle; nested clips are replayed as a stack at flush.
    pub fn clip(&mut self, rect: Rect) {
        self.push(CommandKind::Clip(rect));
    }

    pub fn unclip(&mut self) {
        self.push(CommandKind::Unclip);
    }

    pub fn debug_rect(&mut self, rect: Rect) {
        self.push(CommandKind::Outline(rect));
    }

    /// Redirect subsequent emissions to an arbitrary sequence base. Stack
    /// discipline: the matching [`Device::pop_order`] restores the counter.
    pub fn push_order(&mut self, base: i64) {
        self.order_stack.push(self.current_order);
        self.current_order = base;
    }

    pub fn pop_order(&mut self) {
        if let Some(order) = self.order_stack.pop() {
            self.current_order = order;
        }
    }

    /// Number of commands accumulated since the last flush.
    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Sort the accumulated commands by sequence number and replay them
    /// against the backend, honoring clip nesting. Resets the buffer and the
    /// sequence counter for the next frame.
    pub fn flush(&mut self) {
        self.commands.sort_by_key(|cmd| cmd.order);

        for cmd in self.commands.drain(..) {
            match cmd.kind {
                CommandKind::Blit { src, dst, tint } => self.backend.blit(src, dst, tint),
                CommandKind::Clip(rect) => {
                    self.clip_stack.push(rect);
                    self.backend.set_clip(Some(rect));
                }
                CommandKind::Unclip => {
                    self.clip_stack.pop();
                    self.backend.set_clip(self.clip_stack.last().copied());
                }
                CommandKind::Outline(rect) => self.backend.outline(rect),
            }
        }

        self.clip_stack.clear();
        self.order_stack.clear();
        self.current_order = 0;
    }
}
