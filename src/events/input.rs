//! Application input vocabulary

use crate::app::{Application, Host};

/// Logical key delivered to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character, passed through from the platform code
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Plus,
    Minus,
    Shift,
    Ctrl,
}

/// Mouse button delivered to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// A translated input event, ready for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseButton {
        button: Button,
        pressed: bool,
        x: i32,
        y: i32,
    },
}

impl InputEvent {
    /// Make the single application call this event stands for
    pub fn deliver<A>(self, app: &mut A, host: &mut dyn Host)
    where
        A: Application + ?Sized,
    {
        match self {
            InputEvent::KeyDown(key) => app.key_down(host, key),
            InputEvent::KeyUp(key) => app.key_up(host, key),
            InputEvent::MouseMove { x, y } => app.mouse_move(host, x, y),
            InputEvent::MouseButton {
                button,
                pressed,
                x,
                y,
            } => app.mouse_button(host, button, pressed, x, y),
        }
    }
}
