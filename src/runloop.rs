//! Main loop driver
//!
//! Each tick pumps the backend, drains its queue in delivery order and, if
//! no quit was seen, renders exactly one frame. There is no frame pacing:
//! an empty queue goes straight to rendering.

use crate::app::Application;
use crate::context::Negotiator;
use crate::events::{self, CursorGuard, Dispatch};
use crate::platform::{Backend, PlatformHost};

/// Main loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal: a quit event was observed
    Stopped,
}

/// Drives one application against one backend
pub struct MainLoop<'a, A: Application + ?Sized> {
    app: &'a mut A,
    backend: &'a mut dyn Backend,
    negotiator: &'a mut Negotiator,
    guard: &'a CursorGuard,
    state: LoopState,
}

impl<'a, A: Application + ?Sized> MainLoop<'a, A> {
    /// Create a running loop
    pub fn new(
        app: &'a mut A,
        backend: &'a mut dyn Backend,
        negotiator: &'a mut Negotiator,
        guard: &'a CursorGuard,
    ) -> Self {
        Self {
            app,
            backend,
            negotiator,
            guard,
            state: LoopState::Running,
        }
    }

    /// Current state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run ticks until a quit event stops the loop
    pub fn run(&mut self) -> Result<(), crate::Error> {
        while self.tick()? == LoopState::Running {}
        Ok(())
    }

    /// One iteration: drain pending events, then render once if still running
    pub fn tick(&mut self) -> Result<LoopState, crate::Error> {
        if self.state == LoopState::Stopped {
            return Ok(LoopState::Stopped);
        }

        self.backend.pump();

        while let Some(raw) = self.backend.poll_event() {
            match events::translate(&raw, self.guard) {
                Dispatch::Quit => {
                    log::info!("Quit requested");
                    self.state = LoopState::Stopped;
                    return Ok(LoopState::Stopped);
                }
                Dispatch::Resize { width, height } => {
                    self.negotiator.reconfigure(&mut *self.backend, width, height)?;
                    let mut host = PlatformHost::new(&mut *self.backend, self.guard);
                    self.app.resize(&mut host, width, height);
                }
                Dispatch::Input(input) => {
                    let mut host = PlatformHost::new(&mut *self.backend, self.guard);
                    input.deliver(&mut *self.app, &mut host);
                }
                Dispatch::Ignore => {}
            }
        }

        let mut host = PlatformHost::new(&mut *self.backend, self.guard);
        self.app.render(&mut host)?;
        Ok(LoopState::Running)
    }
}
