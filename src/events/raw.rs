//! Raw platform events as produced by a windowing backend

/// Platform key code
///
/// Codes below `0x100` are printable characters and carry their own value.
/// Everything above is a special key; only a handful of those are known to
/// the shell (see [`crate::events::keymap`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySym(pub u32);

impl KeySym {
    pub const KP_MINUS: KeySym = KeySym(0x10D);
    pub const KP_PLUS: KeySym = KeySym(0x10E);
    pub const UP: KeySym = KeySym(0x111);
    pub const DOWN: KeySym = KeySym(0x112);
    pub const RIGHT: KeySym = KeySym(0x113);
    pub const LEFT: KeySym = KeySym(0x114);
    pub const RSHIFT: KeySym = KeySym(0x12F);
    pub const LSHIFT: KeySym = KeySym(0x130);
    pub const RCTRL: KeySym = KeySym(0x131);
    pub const LCTRL: KeySym = KeySym(0x132);

    /// Whether this code is a literal character
    pub fn is_printable(self) -> bool {
        self.0 < 0x100
    }
}

/// Platform mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ButtonId(pub u8);

impl ButtonId {
    pub const LEFT: ButtonId = ButtonId(1);
    pub const MIDDLE: ButtonId = ButtonId(2);
    pub const RIGHT: ButtonId = ButtonId(3);
}

/// An event pulled from the platform queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    /// The user or the platform asked the process to quit
    Quit,
    /// Key pressed
    KeyDown(KeySym),
    /// Key released
    KeyUp(KeySym),
    /// Pointer moved to window coordinates
    MouseMotion { x: i32, y: i32 },
    /// Mouse button pressed or released at window coordinates
    MouseButton {
        button: ButtonId,
        pressed: bool,
        x: i32,
        y: i32,
    },
    /// The window surface changed size
    Resize { width: u32, height: u32 },
}
