//! Cursor re-entrancy guard
//!
//! Programmatic cursor warps make the platform report pointer motion the
//! user never made. While a warp is in flight the guard is engaged and the
//! translator discards motion events.

use std::cell::Cell;

/// Flag raised for the duration of a programmatic cursor warp
#[derive(Debug, Default)]
pub struct CursorGuard {
    warping: Cell<bool>,
}

impl CursorGuard {
    /// Create a released guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag until the returned token is dropped
    pub fn engage(&self) -> WarpToken<'_> {
        self.warping.set(true);
        WarpToken { guard: self }
    }

    /// Whether a warp is currently in flight
    pub fn is_active(&self) -> bool {
        self.warping.get()
    }
}

/// Keeps the guard engaged while alive
#[must_use = "the guard is released as soon as the token is dropped"]
pub struct WarpToken<'a> {
    guard: &'a CursorGuard,
}

impl Drop for WarpToken<'_> {
    fn drop(&mut self) {
        self.guard.warping.set(false);
    }
}
