//! Fixed translation tables from platform codes to the input vocabulary

use super::input::{Button, Key};
use super::raw::{ButtonId, KeySym};

/// Translate a platform key code to a logical key.
///
/// Printable codes pass through as their character. Returns `None` for
/// special keys the shell does not know about.
pub fn map_key(sym: KeySym) -> Option<Key> {
    if sym.is_printable() {
        return char::from_u32(sym.0).map(Key::Char);
    }

    match sym {
        KeySym::UP => Some(Key::Up),
        KeySym::DOWN => Some(Key::Down),
        KeySym::LEFT => Some(Key::Left),
        KeySym::RIGHT => Some(Key::Right),
        KeySym::KP_PLUS => Some(Key::Plus),
        KeySym::KP_MINUS => Some(Key::Minus),
        KeySym::LSHIFT | KeySym::RSHIFT => Some(Key::Shift),
        KeySym::LCTRL | KeySym::RCTRL => Some(Key::Ctrl),
        _ => None,
    }
}

/// Translate a platform button id. Unknown buttons act as the left button.
pub fn map_button(id: ButtonId) -> Button {
    match id {
        ButtonId::RIGHT => Button::Right,
        ButtonId::MIDDLE => Button::Middle,
        _ => Button::Left,
    }
}
