// Recording application shared by the integration tests
#![allow(dead_code)]

use viewer_shell::context::SurfaceRequest;
use viewer_shell::platform::scripted::CallLog;
use viewer_shell::prelude::*;

/// One call the shell made into the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCall {
    Init(Vec<String>),
    InitGl,
    Resize(u32, u32),
    Render,
    KeyDown(Key),
    KeyUp(Key),
    MouseMove(i32, i32),
    MouseButton(Button, bool, i32, i32),
}

impl AppCall {
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            AppCall::KeyDown(_)
                | AppCall::KeyUp(_)
                | AppCall::MouseMove(..)
                | AppCall::MouseButton(..)
        )
    }
}

/// Application that records every call it receives
#[derive(Default)]
pub struct Recorder {
    pub calls: Vec<AppCall>,
    /// Warp here whenever the pointer moves
    pub warp_on_move: Option<(i32, i32)>,
    /// Flip after drawing
    pub flip: bool,
    pub fail_init: bool,
    pub fail_render: bool,
    pub panic_in_render: bool,
    /// Backend log, to see which surface was current at each resize
    pub backend_log: Option<CallLog>,
    pub surface_at_resize: Vec<Option<SurfaceRequest>>,
}

impl Recorder {
    pub fn observing(log: &CallLog) -> Self {
        Self {
            backend_log: Some(log.clone()),
            ..Self::default()
        }
    }

    pub fn count(&self, call: &AppCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn inputs(&self) -> Vec<AppCall> {
        self.calls.iter().filter(|c| c.is_input()).cloned().collect()
    }
}

impl Application for Recorder {
    fn init(&mut self, args: &[String]) -> anyhow::Result<()> {
        self.calls.push(AppCall::Init(args.to_vec()));
        if self.fail_init {
            anyhow::bail!("missing map data");
        }
        Ok(())
    }

    fn init_gl(&mut self, _host: &mut dyn Host) -> anyhow::Result<()> {
        self.calls.push(AppCall::InitGl);
        Ok(())
    }

    fn resize(&mut self, _host: &mut dyn Host, width: u32, height: u32) {
        self.calls.push(AppCall::Resize(width, height));
        if let Some(log) = &self.backend_log {
            self.surface_at_resize.push(log.configures().last().copied());
        }
    }

    fn render(&mut self, host: &mut dyn Host) -> anyhow::Result<()> {
        self.calls.push(AppCall::Render);
        if self.panic_in_render {
            panic!("renderer state corrupted");
        }
        if self.fail_render {
            anyhow::bail!("shader compilation failed");
        }
        if self.flip {
            host.flip()?;
        }
        Ok(())
    }

    fn key_down(&mut self, _host: &mut dyn Host, key: Key) {
        self.calls.push(AppCall::KeyDown(key));
    }

    fn key_up(&mut self, _host: &mut dyn Host, key: Key) {
        self.calls.push(AppCall::KeyUp(key));
    }

    fn mouse_move(&mut self, host: &mut dyn Host, x: i32, y: i32) {
        self.calls.push(AppCall::MouseMove(x, y));
        if let Some((wx, wy)) = self.warp_on_move {
            host.warp_cursor(wx, wy).unwrap();
        }
    }

    fn mouse_button(&mut self, _host: &mut dyn Host, button: Button, pressed: bool, x: i32, y: i32) {
        self.calls.push(AppCall::MouseButton(button, pressed, x, y));
    }
}
