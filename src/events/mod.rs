//! Input event model for the viewer shell
//!
//! The event layer provides:
//! - Raw platform events as delivered by a windowing backend
//! - The application input vocabulary (logical keys, buttons)
//! - Translation from one to the other, including the fixed key table
//! - The cursor re-entrancy guard used around programmatic warps

pub mod guard;
pub mod input;
pub mod keymap;
pub mod raw;

pub use guard::{CursorGuard, WarpToken};
pub use input::{Button, InputEvent, Key};
pub use raw::{ButtonId, KeySym, RawEvent};

/// Outcome of translating one raw event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Forward to the application input interface
    Input(InputEvent),
    /// Reconfigure the surface, then tell the application
    Resize { width: u32, height: u32 },
    /// Stop the main loop
    Quit,
    /// Nothing to deliver
    Ignore,
}

/// Translate one raw platform event into at most one application call
pub fn translate(event: &RawEvent, guard: &CursorGuard) -> Dispatch {
    match *event {
        RawEvent::Quit => Dispatch::Quit,
        RawEvent::KeyDown(sym) => keymap::map_key(sym)
            .map(|key| Dispatch::Input(InputEvent::KeyDown(key)))
            .unwrap_or(Dispatch::Ignore),
        RawEvent::KeyUp(sym) => keymap::map_key(sym)
            .map(|key| Dispatch::Input(InputEvent::KeyUp(key)))
            .unwrap_or(Dispatch::Ignore),
        RawEvent::MouseMotion { .. } if guard.is_active() => Dispatch::Ignore,
        RawEvent::MouseMotion { x, y } => Dispatch::Input(InputEvent::MouseMove { x, y }),
        RawEvent::MouseButton {
            button,
            pressed,
            x,
            y,
        } => Dispatch::Input(InputEvent::MouseButton {
            button: keymap::map_button(button),
            pressed,
            x,
            y,
        }),
        RawEvent::Resize { width, height } => Dispatch::Resize { width, height },
    }
}
