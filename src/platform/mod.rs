// Platform backends for the viewer shell

use crate::app::Host;
use crate::context::{ContextError, SurfaceRequest};
use crate::events::{CursorGuard, RawEvent};

#[cfg(feature = "desktop")]
pub mod desktop;
pub mod scripted;

/// Trait for windowing backends
///
/// A backend owns the window, the platform event queue and the rendering
/// context. It is opened once per process and shut down exactly once.
pub trait Backend {
    /// Backend name used in logs
    fn name(&self) -> &str;

    /// Collect pending platform events into the queue without blocking
    fn pump(&mut self) {}

    /// Take the next queued event, oldest first
    fn poll_event(&mut self) -> Option<RawEvent>;

    /// Create the surface and context, or reconfigure the existing one
    fn configure_surface(&mut self, request: &SurfaceRequest) -> Result<(), ContextError>;

    /// Move the pointer to window coordinates
    fn warp_cursor(&mut self, x: i32, y: i32) -> Result<(), crate::Error>;

    /// Set pointer visibility
    fn set_cursor_visible(&mut self, visible: bool);

    /// Swap front and back buffers
    fn swap_buffers(&mut self) -> Result<(), crate::Error>;

    /// Release the context and shut the platform down
    fn shutdown(&mut self) {}
}

/// [`Host`] implementation handed to the application during callbacks
pub struct PlatformHost<'a> {
    backend: &'a mut dyn Backend,
    guard: &'a CursorGuard,
}

impl<'a> PlatformHost<'a> {
    /// Wrap a backend and the guard its warps must raise
    pub fn new(backend: &'a mut dyn Backend, guard: &'a CursorGuard) -> Self {
        Self { backend, guard }
    }
}

impl Host for PlatformHost<'_> {
    fn warp_cursor(&mut self, x: i32, y: i32) -> Result<(), crate::Error> {
        let _warping = self.guard.engage();
        self.backend.warp_cursor(x, y)
    }

    fn show_cursor(&mut self, show: bool) {
        // touch builds never show the pointer
        let visible = show && !cfg!(feature = "touchpad");
        self.backend.set_cursor_visible(visible);
    }

    fn flip(&mut self) -> Result<(), crate::Error> {
        self.backend.swap_buffers()
    }
}
