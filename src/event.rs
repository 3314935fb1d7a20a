//! Normalized input events crossing into the toolkit.
//!
//! Translation from a native platform event source (SDL, winit, a terminal)
//! into these shapes is the host's responsibility. Mouse events are routed
//! top-down through the widget tree with hit-testing; keyboard events always
//! target the current focus.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Down,
    Up,
    Move,
}

#[derive(Debug, Clone, Copy)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: i32,
    pub y: i32,
    pub button: MouseButton,
}

impl MouseEvent {
    pub fn down(x: i32, y: i32) -> Self {
        Self {
            kind: MouseEventKind::Down,
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn up(x: i32, y: i32) -> Self {
        Self {
            kind: MouseEventKind::Up,
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            kind: MouseEventKind::Move,
            x,
            y,
            button: MouseButton::Left,
        }
    }
}

/// Named keys for navigation and editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Home,
    End,
    Backspace,
    Delete,
}

/// Clipboard-style command keys (Ctrl-modified on most platforms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Copy,
    Paste,
}

#[derive(Debug, Clone, Copy)]
pub enum KeyboardEvent {
    /// A navigation or editing key went down.
    KeyDown(Key),
    /// A printable character was typed.
    TextType(char),
    /// A clipboard command was issued.
    Command(EditCommand),
}

/// Whether an event was consumed during routing. Routing short-circuits on
/// the first widget that reports `Handled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Ignored,
    Handled,
}

impl EventResponse {
    pub fn is_handled(self) -> bool {
        self == EventResponse::Handled
    }
}
