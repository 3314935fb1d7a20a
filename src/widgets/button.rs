//! Push button with a three-state pointer machine.

use crate::backend::Backend;
use crate::device::Device;
use crate::event::{EventResponse, MouseEvent, MouseEventKind};
use crate::geometry::{Color, Rect};
use crate::tree::{Tree, Wid};

/// Handler invoked when a button press completes (pointer released inside).
pub type PressCallback = Box<dyn FnMut()>;

/// Pointer interaction state shared by button-like widgets. The value doubles
/// as the patch tile index for the enabled visual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Normal,
    Hover,
    Pressed,
}

pub(crate) const DISABLED_TILE: u8 = 3;
pub(crate) const DISABLED_SHADE: u8 = 37;

/// A clickable button filling its allocation, drawn as a nine-slice patch
/// with centered, clipped text.
#[derive(Default)]
pub struct Button {
    pub text: String,
    pub on_pressed: Option<PressCallback>,
    pub disabled: bool,
    pub state: ButtonState,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn on_pressed(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_pressed = Some(Box::new(callback));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn tile(&self) -> u8 {
        if self.disabled {
            DISABLED_TILE
        } else {
            self.state as u8
        }
    }

    pub(crate) fn resolve_bounds<B: Backend>(
        &self,
        _dev: &mut Device<B>,
        _wid: Wid,
        allocation: Rect,
        _tree: &mut Tree,
    ) -> Rect {
        allocation
    }

    pub(crate) fn draw<B: Backend>(
        &self,
        dev: &mut Device<B>,
        wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) {
        let bounds = tree.bounds_of(wid);
        let mut label = bounds.pad(10, 5, 10, 5);

        let shade = if self.disabled {
            Color::shade(DISABLED_SHADE)
        } else {
            Color::WHITE
        };
        dev.draw_patch(self.tile(), bounds);

        if self.state == ButtonState::Pressed {
            label.y += 1;
        }

        let x = label.width / 2 - dev.text_width(&self.text) / 2;
        dev.clip(bounds);
        dev.draw_text(
            &self.text,
            x + label.x,
            (label.height / 2 - dev.cell_height() / 2) + label.y,
            shade,
        );
        dev.unclip();
    }

    pub(crate) fn on_mouse<B: Backend>(
        &mut self,
        _dev: &mut Device<B>,
        event: &MouseEvent,
        wid: Wid,
        _allocation: Rect,
        tree: &mut Tree,
    ) -> EventResponse {
        if self.disabled {
            return EventResponse::Ignored;
        }
        let bounds = tree.bounds_of(wid);
        match event.kind {
            MouseEventKind::Move => {
                if self.state == ButtonState::Normal && bounds.contains(event.x, event.y) {
                    self.state = ButtonState::Hover;
                } else if self.state == ButtonState::Hover && !bounds.contains(event.x, event.y) {
                    self.state = ButtonState::Normal;
                }
            }
            MouseEventKind::Down => {
                if self.state == ButtonState::Hover {
                    tree.set_focus(Some(wid));
                    self.state = ButtonState::Pressed;
                    return EventResponse::Handled;
                }
            }
            MouseEventKind::Up => {
                if self.state == ButtonState::Pressed {
                    if bounds.contains(event.x, event.y) {
                        if let Some(callback) = self.on_pressed.as_mut() {
                            callback();
                        }
                        self.state = ButtonState::Hover;
                        return EventResponse::Handled;
                    }
                    self.state = ButtonState::Normal;
                }
            }
        }
        EventResponse::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{AtlasMetrics, RecordingBackend};
    use std::cell::Cell;
    use std::rc::Rc;

    fn device() -> Device<RecordingBackend> {
        Device::new(RecordingBackend::new(800, 600), AtlasMetrics::uniform(8, 8))
    }

    fn pressed(tree: &Tree, wid: Wid) -> ButtonState {
        tree.get::<Button>(wid).unwrap().state
    }

    #[test]
    fn test_click_fires_callback_and_sets_focus() {
        let mut dev = device();
        let mut tree = Tree::new();
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let b = tree.create(Button::new("ok").on_pressed(move || seen.set(seen.get() + 1)));

        let allocation = Rect::new(0, 0, 100, 40);
        tree.resolve_bounds(&mut dev, b, allocation);

        tree.route_mouse(&mut dev, &MouseEvent::moved(50, 20), b, allocation);
        assert_eq!(pressed(&tree, b), ButtonState::Hover);

        let down = tree.route_mouse(&mut dev, &MouseEvent::down(50, 20), b, allocation);
        assert!(down.is_handled());
        assert_eq!(pressed(&tree, b), ButtonState::Pressed);
        assert_eq!(tree.focus(), Some(b));

        let up = tree.route_mouse(&mut dev, &MouseEvent::up(50, 20), b, allocation);
        assert!(up.is_handled());
        assert_eq!(pressed(&tree, b), ButtonState::Hover);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_release_outside_cancels_press() {
        let mut dev = device();
        let mut tree = Tree::new();
        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        let b = tree.create(Button::new("ok").on_pressed(move || seen.set(seen.get() + 1)));

        let allocation = Rect::new(0, 0, 100, 40);
        tree.resolve_bounds(&mut dev, b, allocation);

        tree.route_mouse(&mut dev, &MouseEvent::moved(50, 20), b, allocation);
        tree.route_mouse(&mut dev, &MouseEvent::down(50, 20), b, allocation);
        let up = tree.route_mouse(&mut dev, &MouseEvent::up(200, 200), b, allocation);

        assert_eq!(up, EventResponse::Ignored);
        assert_eq!(pressed(&tree, b), ButtonState::Normal);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_hover_clears_when_pointer_leaves() {
        let mut dev = device();
        let mut tree = Tree::new();
        let b = tree.create(Button::new("ok"));

        let allocation = Rect::new(0, 0, 100, 40);
        tree.resolve_bounds(&mut dev, b, allocation);

        tree.route_mouse(&mut dev, &MouseEvent::moved(50, 20), b, allocation);
        assert_eq!(pressed(&tree, b), ButtonState::Hover);
        tree.route_mouse(&mut dev, &MouseEvent::moved(200, 200), b, allocation);
        assert_eq!(pressed(&tree, b), ButtonState::Normal);
    }

    #[test]
    fn test_down_without_hover_is_ignored() {
        // a press can only begin from Hover, so a down event with no prior
        // move never registers
        let mut dev = device();
        let mut tree = Tree::new();
        let b = tree.create(Button::new("ok"));

        let allocation = Rect::new(0, 0, 100, 40);
        tree.resolve_bounds(&mut dev, b, allocation);

        let down = tree.route_mouse(&mut dev, &MouseEvent::down(50, 20), b, allocation);
        assert_eq!(down, EventResponse::Ignored);
        assert_eq!(pressed(&tree, b), ButtonState::Normal);
    }

    #[test]
    fn test_disabled_button_ignores_everything() {
        let mut dev = device();
        let mut tree = Tree::new();
        let b = tree.create(Button::new("ok").disabled(true));

        let allocation = Rect::new(0, 0, 100, 40);
        tree.resolve_bounds(&mut dev, b, allocation);

        tree.route_mouse(&mut dev, &MouseEvent::moved(50, 20), b, allocation);
        let down = tree.route_mouse(&mut dev, &MouseEvent::down(50, 20), b, allocation);
        assert_eq!(down, EventResponse::Ignored);
        assert_eq!(pressed(&tree, b), ButtonState::Normal);
        assert!(tree.focus().is_none());
    }

    #[test]
    fn test_pressed_label_nudges_down() {
        let mut dev = device();
        let mut tree = Tree::new();
        let b = tree.create(Button::new("x"));

        let allocation = Rect::new(0, 0, 100, 40);
        tree.resolve_bounds(&mut dev, b, allocation);
        tree.draw(&mut dev, b, allocation);
        dev.flush();
        let normal_y = dev.backend().blits.last().unwrap().dst.y;

        dev.backend_mut().clear();
        tree.get_mut::<Button>(b).unwrap().state = ButtonState::Pressed;
        tree.draw(&mut dev, b, allocation);
        dev.flush();
        let pressed_y = dev.backend().blits.last().unwrap().dst.y;

        assert_eq!(pressed_y, normal_y + 1);
    }
}
