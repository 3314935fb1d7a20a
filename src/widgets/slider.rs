//! Horizontal value slider with a draggable thumb and a transient value
//! balloon drawn above everything else via the order override.

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, MouseEvent, MouseEventKind};
use crate::geometry::{Color, Rect};
use crate::tree::{Tree, Wid};
use crate::widgets::button::{ButtonState, DISABLED_TILE};

/// Handler invoked with each distinct clamped value while dragging.
pub type ChangeCallback = Box<dyn FnMut(i32)>;

pub const SLIDER_HEIGHT: i32 = 16;
pub const SLIDER_THUMB_WIDTH: i32 = 16;

const TRACK_TILE: u8 = 4;
const THUMB_TILE: u8 = 0;
const BALLOON_ORDER: i64 = 99999;

/// A slider spanning its allocation's width at a fixed height. The thumb is
/// positioned by the `(value - min) / (max - min)` ratio along the track.
#[derive(Default)]
pub struct Slider {
    pub min: i32,
    pub max: i32,
    pub value: i32,
    pub disabled: bool,
    pub on_change: Option<ChangeCallback>,
    pub state: ButtonState,
}

impl Slider {
    pub fn new() -> Self {
        Self {
            max: 100,
            ..Self::default()
        }
    }

    pub fn range(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn value(mut self, value: i32) -> Self {
        self.value = value;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_change(mut self, callback: impl FnMut(i32) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    fn track(bounds: Rect) -> Rect {
        Rect::new(
            bounds.x + SLIDER_THUMB_WIDTH / 2,
            bounds.y,
            bounds.width - SLIDER_THUMB_WIDTH,
            SLIDER_HEIGHT,
        )
    }

    /// Recompute the value from the pointer's horizontal position. Fires the
    /// change callback only when the clamped value actually moves.
    fn drag(&mut self, tree: &mut Tree, wid: Wid, bounds: Rect, px: i32, py: i32) -> EventResponse {
        tree.set_focus(Some(wid));

        if !bounds.contains(px, py) {
            self.state = ButtonState::Normal;
            return EventResponse::Ignored;
        }

        let track = Self::track(bounds);
        let ratio = (px - track.x) as f32 / track.width as f32;
        let next = (self.min + (ratio * (self.max - self.min) as f32) as i32)
            .clamp(self.min, self.max);
        if next != self.value {
            self.value = next;
            if let Some(callback) = self.on_change.as_mut() {
                callback(next);
            }
            return EventResponse::Handled;
        }
        EventResponse::Ignored
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        _dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        _tree: &mut Tree,
    ) -> Rect {
        Rect::new(allocation.x, allocation.y, allocation.width, SLIDER_HEIGHT)
    }

    pub(crate) fn draw<B: Backend>(
        &self,
        dev: &mut Device<B>,
        wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) {
        let label = self.value.to_string();
        let balloon_width = dev.text_width(&label) + 12;

        let bounds = tree.bounds_of(wid);
        let track = Self::track(bounds);
        let ratio = (self.value - self.min) as f32 / (self.max - self.min) as f32;
        let thumb_x = (ratio * track.width as f32) as i32;
        let thumb = Rect::new(
            bounds.x + thumb_x,
            bounds.y,
            SLIDER_THUMB_WIDTH,
            SLIDER_HEIGHT,
        );

        dev.draw_patch(if self.disabled { DISABLED_TILE } else { TRACK_TILE }, bounds);
        dev.draw_patch(if self.disabled { DISABLED_TILE } else { THUMB_TILE }, thumb);

        if self.state == ButtonState::Pressed {
            let balloon = Rect::new(
                thumb.x + SLIDER_THUMB_WIDTH / 2,
                thumb.y + SLIDER_HEIGHT + 1,
                balloon_width,
                dev.cell_height() + 2,
            );

            dev.push_order(BALLOON_ORDER);
            dev.draw_balloon(balloon.x, balloon.y, balloon.width, balloon.height);
            dev.draw_text(
                &label,
                balloon.x - (dev.text_width(&label) / 2 + 2),
                (balloon.y + 4) + (balloon.height / 2 - dev.cell_height() / 2),
                Color::WHITE,
            );
            dev.pop_order();
        }
    }

    pub(crate) fn on_mouse<B: Backend>(
        &mut self,
        _dev: &mut Device<B>,
        event: &MouseEvent,
        wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) -> EventResponse {
        let bounds = tree.bounds_of(wid);
        match event.kind {
            MouseEventKind::Down => {
                self.state = ButtonState::Pressed;
                self.drag(tree, wid, bounds, event.x, event.y)
            }
            MouseEventKind::Move if self.state == ButtonState::Pressed => {
                self.drag(tree, wid, bounds, event.x, event.y)
            }
            MouseEventKind::Up => {
                self.state = ButtonState::Normal;
                EventResponse::Ignored
            }
            _ => EventResponse::Ignored,
        }
    }
}
