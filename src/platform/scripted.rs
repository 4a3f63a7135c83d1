//! Scripted backend that replays canned event batches.
//!
//! Each call to [`Backend::pump`] moves the next scripted batch into the
//! queue. Once the script is exhausted a quit event is queued so a driven
//! loop always terminates. Every platform call is recorded in a shared
//! [`CallLog`] that stays readable after the backend is handed over.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::Backend;
use crate::context::{ContextError, SurfaceRequest};
use crate::events::RawEvent;

type SurfaceFilter = Box<dyn FnMut(&SurfaceRequest) -> bool>;
type WarpHook = Box<dyn FnMut(i32, i32)>;

/// A platform call made by the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    Configure(SurfaceRequest),
    Warp(i32, i32),
    CursorVisible(bool),
    SwapBuffers,
    Shutdown,
}

/// Shared record of backend calls
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<BackendCall>>>);

impl CallLog {
    fn push(&self, call: BackendCall) {
        self.0.borrow_mut().push(call);
    }

    /// Copy of every call so far, in order
    pub fn snapshot(&self) -> Vec<BackendCall> {
        self.0.borrow().clone()
    }

    /// Surface requests seen so far, accepted or not
    pub fn configures(&self) -> Vec<SurfaceRequest> {
        self.0
            .borrow()
            .iter()
            .filter_map(|call| match call {
                BackendCall::Configure(request) => Some(*request),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded calls equal to `call`
    pub fn count(&self, call: &BackendCall) -> usize {
        self.0.borrow().iter().filter(|c| *c == call).count()
    }
}

/// Backend driven by a fixed script of per-tick event batches
#[derive(Default)]
pub struct ScriptedBackend {
    ticks: VecDeque<Vec<RawEvent>>,
    queue: VecDeque<RawEvent>,
    calls: CallLog,
    reject: Option<SurfaceFilter>,
    on_warp: Option<WarpHook>,
    swap_failure: Option<String>,
}

impl ScriptedBackend {
    /// Create an empty script and the log it records into
    pub fn new() -> (Self, CallLog) {
        let backend = Self::default();
        let calls = backend.calls.clone();
        (backend, calls)
    }

    /// Append one tick worth of events
    pub fn with_tick(mut self, events: impl IntoIterator<Item = RawEvent>) -> Self {
        self.ticks.push_back(events.into_iter().collect());
        self
    }

    /// Fail every surface request for which `filter` returns true
    pub fn reject_surfaces(
        mut self,
        filter: impl FnMut(&SurfaceRequest) -> bool + 'static,
    ) -> Self {
        self.reject = Some(Box::new(filter));
        self
    }

    /// Run `hook` whenever the shell warps the cursor
    pub fn on_warp(mut self, hook: impl FnMut(i32, i32) + 'static) -> Self {
        self.on_warp = Some(Box::new(hook));
        self
    }

    /// Make every buffer swap fail with `reason`
    pub fn fail_swaps(mut self, reason: impl Into<String>) -> Self {
        self.swap_failure = Some(reason.into());
        self
    }
}

impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn pump(&mut self) {
        match self.ticks.pop_front() {
            Some(batch) => self.queue.extend(batch),
            None => self.queue.push_back(RawEvent::Quit),
        }
    }

    fn poll_event(&mut self) -> Option<RawEvent> {
        self.queue.pop_front()
    }

    fn configure_surface(&mut self, request: &SurfaceRequest) -> Result<(), ContextError> {
        self.calls.push(BackendCall::Configure(*request));
        let rejected = self.reject.as_mut().map_or(false, |reject| reject(request));
        if rejected {
            return Err(ContextError::NoMatchingConfig(request.to_string()));
        }
        Ok(())
    }

    fn warp_cursor(&mut self, x: i32, y: i32) -> Result<(), crate::Error> {
        self.calls.push(BackendCall::Warp(x, y));
        if let Some(hook) = self.on_warp.as_mut() {
            hook(x, y);
        }
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.calls.push(BackendCall::CursorVisible(visible));
    }

    fn swap_buffers(&mut self) -> Result<(), crate::Error> {
        self.calls.push(BackendCall::SwapBuffers);
        match &self.swap_failure {
            Some(reason) => Err(crate::Error::Present(reason.clone())),
            None => Ok(()),
        }
    }

    fn shutdown(&mut self) {
        self.calls.push(BackendCall::Shutdown);
    }
}
