//! Interface between the shell and the viewer application
//!
//! The application owns rendering, camera and map state. The shell only
//! calls into it through [`Application`] and offers it a small set of
//! platform services through [`Host`].

use crate::events::{Button, Key};

/// Platform services available to the application during any callback
pub trait Host {
    /// Move the pointer to window coordinates.
    ///
    /// Motion reported by the platform while the warp is in flight never
    /// reaches [`Application::mouse_move`].
    fn warp_cursor(&mut self, x: i32, y: i32) -> Result<(), crate::Error>;

    /// Show or hide the pointer
    fn show_cursor(&mut self, show: bool);

    /// Present the completed frame
    fn flip(&mut self) -> Result<(), crate::Error>;
}

/// The viewer application driven by the shell
pub trait Application {
    /// One-time setup from the process arguments
    fn init(&mut self, args: &[String]) -> anyhow::Result<()>;

    /// One-time graphics setup, called once the first context is current
    fn init_gl(&mut self, _host: &mut dyn Host) -> anyhow::Result<()> {
        Ok(()) // Default implementation does nothing
    }

    /// The surface was (re)configured to the given size
    fn resize(&mut self, host: &mut dyn Host, width: u32, height: u32);

    /// Draw one frame
    fn render(&mut self, host: &mut dyn Host) -> anyhow::Result<()>;

    /// A key was pressed
    fn key_down(&mut self, _host: &mut dyn Host, _key: Key) {}

    /// A key was released
    fn key_up(&mut self, _host: &mut dyn Host, _key: Key) {}

    /// The pointer moved
    fn mouse_move(&mut self, _host: &mut dyn Host, _x: i32, _y: i32) {}

    /// A mouse button changed state
    fn mouse_button(
        &mut self,
        _host: &mut dyn Host,
        _button: Button,
        _pressed: bool,
        _x: i32,
        _y: i32,
    ) {
    }
}
