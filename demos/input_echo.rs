// Minimal viewer that echoes translated input to the log
use std::process::ExitCode;

use viewer_shell::lifecycle;
use viewer_shell::platform::desktop::DesktopBackend;
use viewer_shell::platform::Backend;
use viewer_shell::prelude::*;

#[derive(Default)]
struct InputEcho {
    size: (u32, u32),
    frames: u64,
}

impl Application for InputEcho {
    fn init(&mut self, args: &[String]) -> anyhow::Result<()> {
        log::info!("Started with arguments {:?}", args.iter().skip(1).collect::<Vec<_>>());
        Ok(())
    }

    fn resize(&mut self, _host: &mut dyn Host, width: u32, height: u32) {
        log::info!("Surface is now {width}x{height}");
        self.size = (width, height);
    }

    fn render(&mut self, host: &mut dyn Host) -> anyhow::Result<()> {
        self.frames += 1;
        host.flip()?;
        Ok(())
    }

    fn key_down(&mut self, _host: &mut dyn Host, key: Key) {
        log::info!("key down {key:?}");
    }

    fn key_up(&mut self, _host: &mut dyn Host, key: Key) {
        log::info!("key up {key:?}");
    }

    fn mouse_move(&mut self, _host: &mut dyn Host, x: i32, y: i32) {
        log::debug!("pointer at {x},{y}");
    }

    fn mouse_button(&mut self, host: &mut dyn Host, button: Button, pressed: bool, x: i32, y: i32) {
        log::info!("{button:?} {} at {x},{y}", if pressed { "pressed" } else { "released" });

        // Middle button re-centres the pointer
        if button == Button::Middle && pressed {
            let (w, h) = self.size;
            if let Err(e) = host.warp_cursor(w as i32 / 2, h as i32 / 2) {
                log::warn!("{e}");
            }
        }
    }
}

fn main() -> ExitCode {
    lifecycle::init_logging();

    let mut app = InputEcho::default();
    let status = lifecycle::launch(&mut app, |config| {
        let backend = DesktopBackend::open(config)?;
        Ok(Box::new(backend) as Box<dyn Backend>)
    });
    log::info!("Rendered {} frames", app.frames);
    status
}
