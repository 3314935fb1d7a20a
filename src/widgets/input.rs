//! Single-line text input with regex-validated typing, caret navigation, and
//! horizontal scrolling.

use regex::Regex;

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EditCommand, EventResponse, Key, KeyboardEvent, MouseEvent, MouseEventKind};
use crate::geometry::{Color, Rect};
use crate::tree::{Tree, Wid};
use crate::widgets::button::DISABLED_SHADE;

pub const INPUT_HEIGHT: i32 = 22;

const IDLE_TILE: u8 = 4;
const FOCUSED_TILE: u8 = 5;
const DISABLED_TILE: u8 = 3;

/// A single-line text field. Typed characters are tested against a
/// validation pattern before insertion; navigation and editing keys move the
/// caret, and the view scrolls horizontally so the caret stays visible.
///
/// Clicking the field sets focus and refreshes the scroll offset; it does
/// not reposition the caret from the click point.
pub struct Input {
    pub text: String,
    pub masked: bool,
    pub disabled: bool,
    pattern: Regex,
    cursor: usize,
    view_x: i32,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            text: String::new(),
            masked: false,
            disabled: false,
            pattern: Regex::new("^(?s:.)$").expect("default pattern is valid"),
            cursor: 0,
            view_x: 0,
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the validation pattern for typed characters. The pattern is
    /// anchored to match the whole character; an invalid pattern is rejected
    /// with a warning and the previous pattern stays in effect.
    pub fn pattern(mut self, pattern: &str) -> Self {
        match Regex::new(&format!("^(?:{pattern})$")) {
            Ok(re) => self.pattern = re,
            Err(err) => log::warn!("invalid input pattern {pattern:?}: {err}"),
        }
        self
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Caret position as a character index into the text.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the given character index.
    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn accepts(&self, c: char) -> bool {
        self.pattern.is_match(c.encode_utf8(&mut [0; 4]))
    }

    fn caret_x<B: Backend>(&self, dev: &Device<B>) -> i32 {
        self.cursor as i32 * (dev.cell_width() + dev.char_spacing_x()) - dev.cell_width() / 2
    }

    /// Re-derive the scroll offset so the caret stays within a one-cell
    /// margin of the visible window.
    fn update_scroll<B: Backend>(&mut self, dev: &Device<B>, bounds: Rect) {
        let margin = dev.cell_width();
        let caret_x = self.caret_x(dev);
        if caret_x - self.view_x > bounds.width - margin {
            self.view_x = caret_x - (bounds.width - margin);
        } else if caret_x - self.view_x < 0 {
            self.view_x = caret_x;
        }
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        _dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        _tree: &mut Tree,
    ) -> Rect {
        Rect::new(allocation.x, allocation.y, allocation.width, INPUT_HEIGHT)
    }

    pub(crate) fn draw<B: Backend>(
        &self,
        dev: &mut Device<B>,
        wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) {
        let bounds = tree.bounds_of(wid);
        let focused = tree.focus() == Some(wid);

        let tile = if self.disabled {
            DISABLED_TILE
        } else if focused {
            FOCUSED_TILE
        } else {
            IDLE_TILE
        };
        dev.draw_patch(tile, bounds);

        let shade = if self.disabled {
            Color::shade(DISABLED_SHADE)
        } else {
            Color::WHITE
        };
        let text = if self.masked {
            "*".repeat(self.char_count())
        } else {
            self.text.clone()
        };

        let text_y = bounds.y + (bounds.height / 2 - dev.cell_height() / 2);
        let interior = bounds.pad(4, 2, 4, 2);
        dev.clip(interior);
        dev.draw_text(&text, bounds.x - self.view_x, text_y, shade);
        dev.unclip();

        if !self.disabled && focused {
            dev.draw_text(
                "|",
                (bounds.x + self.caret_x(dev)) - self.view_x,
                text_y,
                Color::WHITE,
            );
        }
    }

    pub(crate) fn on_mouse<B: Backend>(
        &mut self,
        dev: &mut Device<B>,
        event: &MouseEvent,
        wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) -> EventResponse {
        if self.disabled {
            return EventResponse::Ignored;
        }
        let bounds = tree.bounds_of(wid);
        if event.kind == MouseEventKind::Down && bounds.contains(event.x, event.y) {
            self.update_scroll(dev, bounds);
            tree.set_focus(Some(wid));
            return EventResponse::Handled;
        }
        EventResponse::Ignored
    }

    pub(crate) fn on_key<B: Backend>(
        &mut self,
        dev: &mut Device<B>,
        event: &KeyboardEvent,
        wid: Wid,
        tree: &mut Tree,
    ) {
        if self.disabled {
            return;
        }
        let bounds = tree.bounds_of(wid);

        match *event {
            KeyboardEvent::TextType(c) => {
                if self.accepts(c) {
                    let at = self.byte_at(self.cursor);
                    self.text.insert(at, c);
                    self.cursor += 1;
                }
            }
            KeyboardEvent::KeyDown(key) => match key {
                Key::Left => {
                    if self.cursor > 0 {
                        self.cursor -= 1;
                    }
                }
                Key::Right => {
                    if self.cursor < self.char_count() {
                        self.cursor += 1;
                    }
                }
                Key::Delete => {
                    if self.cursor < self.char_count() {
                        let at = self.byte_at(self.cursor);
                        self.text.remove(at);
                    }
                }
                Key::Backspace => {
                    if self.cursor > 0 {
                        self.cursor -= 1;
                        let at = self.byte_at(self.cursor);
                        self.text.remove(at);
                    }
                }
                Key::Home => self.cursor = 0,
                Key::End => self.cursor = self.char_count(),
            },
            KeyboardEvent::Command(command) => match command {
                // the backend exposes no clipboard write, so copy stays inert
                EditCommand::Copy => {}
                EditCommand::Paste => {
                    let at = self.byte_at(self.cursor);
                    let pasted = dev.clipboard_text();
                    self.text.insert_str(at, &pasted);
                }
            },
        }
        self.update_scroll(dev, bounds);
    }
}
