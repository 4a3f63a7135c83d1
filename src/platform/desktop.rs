//! Desktop backend on winit + glutin
//!
//! winit's event loop is pumped with a zero timeout once per tick and the
//! window events are queued as [`RawEvent`]s. The GL context and surface are
//! created by glutin on the first surface request and resized afterwards. An
//! empty config match is reported as a context error, never a panic.

use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::time::Duration;

use glutin::config::{Api, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, DisplayApiPreference, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};
use glutin_winit::{finalize_window, GlWindow};
use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{Key, KeyCode, NamedKey, PhysicalKey};
use winit::platform::modifier_supplement::KeyEventExtModifierSupplement;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowBuilder};

use super::Backend;
use crate::config::ShellConfig;
use crate::context::{ContextError, GraphicsApi, SurfaceRequest};
use crate::events::{ButtonId, KeySym, RawEvent};

/// GL objects, dropped context first and window last
struct GlState {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: Window,
}

/// Desktop platform backend
pub struct DesktopBackend {
    event_loop: EventLoop<()>,
    title: String,
    key_repeat: bool,
    queue: VecDeque<RawEvent>,
    cursor: (i32, i32),
    gl: Option<GlState>,
}

impl DesktopBackend {
    /// Initialize the platform event loop. No window exists until the first
    /// surface request.
    pub fn open(config: &ShellConfig) -> Result<Self, crate::Error> {
        let event_loop =
            EventLoop::new().map_err(|e| crate::Error::PlatformInit(e.to_string()))?;

        Ok(Self {
            event_loop,
            title: config.title.clone(),
            key_repeat: config.key_repeat,
            queue: VecDeque::new(),
            cursor: (0, 0),
            gl: None,
        })
    }

    /// Create window, context and surface in one go
    fn create_gl(&self, request: &SurfaceRequest) -> Result<GlState, ContextError> {
        let fullscreen = request.fullscreen.then_some(Fullscreen::Borderless(None));
        let window_builder = WindowBuilder::new()
            .with_title(self.title.as_str())
            .with_inner_size(PhysicalSize::new(request.width, request.height))
            .with_resizable(!request.fullscreen)
            .with_fullscreen(fullscreen);

        let mut template = ConfigTemplateBuilder::new()
            .with_single_buffering(!request.double_buffer)
            .with_depth_size(request.depth_bits);
        if request.is_multisampled() {
            template = template.with_multisampling(request.samples);
        }
        if let GraphicsApi::Gles { major, .. } = request.api {
            template = template.with_api(if major < 2 { Api::GLES1 } else { Api::GLES2 });
        }

        // WGL needs the window before the display, everyone else picks a
        // config first so the window can take the config's visual
        #[cfg(target_os = "windows")]
        let (window_builder, early_window) = {
            let window = window_builder
                .build(&self.event_loop)
                .map_err(|e| ContextError::Creation(e.to_string()))?;
            template = template.compatible_with_native_window(window.raw_window_handle());
            (None, Some(window))
        };
        #[cfg(not(target_os = "windows"))]
        let (window_builder, early_window) = (Some(window_builder), None);

        let preference = display_preference(early_window.as_ref());
        let gl_display = unsafe { Display::new(self.event_loop.raw_display_handle(), preference) }
            .map_err(|e| ContextError::Creation(e.to_string()))?;

        let configs = unsafe { gl_display.find_configs(template.build()) }
            .map_err(|e| ContextError::NoMatchingConfig(format!("{request}: {e}")))?;
        let gl_config = closest_by_samples(configs, |config| config.num_samples(), request.samples)
            .ok_or_else(|| ContextError::NoMatchingConfig(request.to_string()))?;

        if request.is_multisampled() && gl_config.num_samples() == 0 {
            return Err(ContextError::NoMatchingConfig(request.to_string()));
        }

        let window = match (early_window, window_builder) {
            (Some(window), _) => window,
            (None, Some(builder)) => finalize_window(&self.event_loop, builder, &gl_config)
                .map_err(|e| ContextError::Creation(e.to_string()))?,
            (None, None) => {
                return Err(ContextError::Creation("window was not created".to_string()))
            }
        };

        let context_api = match request.api {
            GraphicsApi::OpenGl => ContextApi::OpenGl(None),
            GraphicsApi::Gles { major, minor } => ContextApi::Gles(Some(Version::new(major, minor))),
        };
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(context_api)
            .build(Some(window.raw_window_handle()));

        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| ContextError::Creation(e.to_string()))?;

        let surface_attributes =
            window.build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new());
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| ContextError::Creation(e.to_string()))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| ContextError::Creation(e.to_string()))?;

        log::debug!(
            "GL config: {} samples, {} depth bits",
            gl_config.num_samples(),
            gl_config.depth_size()
        );

        Ok(GlState {
            context,
            surface,
            window,
        })
    }
}

impl Backend for DesktopBackend {
    fn name(&self) -> &str {
        "desktop"
    }

    fn pump(&mut self) {
        let queue = &mut self.queue;
        let cursor = &mut self.cursor;
        let key_repeat = self.key_repeat;

        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, _target| {
                if let Event::WindowEvent { event, .. } = event {
                    if let Some(raw) = translate_window_event(event, cursor, key_repeat) {
                        queue.push_back(raw);
                    }
                }
            });

        if let PumpStatus::Exit(code) = status {
            log::debug!("Platform event loop exited with status {code}");
            self.queue.push_back(RawEvent::Quit);
        }
    }

    fn poll_event(&mut self) -> Option<RawEvent> {
        self.queue.pop_front()
    }

    fn configure_surface(&mut self, request: &SurfaceRequest) -> Result<(), ContextError> {
        let invalid = || ContextError::InvalidSize {
            width: request.width,
            height: request.height,
        };
        let width = NonZeroU32::new(request.width).ok_or_else(invalid)?;
        let height = NonZeroU32::new(request.height).ok_or_else(invalid)?;

        if let Some(gl) = &self.gl {
            gl.surface.resize(&gl.context, width, height);
            return Ok(());
        }
        let gl = self.create_gl(request)?;
        self.gl = Some(gl);
        Ok(())
    }

    fn warp_cursor(&mut self, x: i32, y: i32) -> Result<(), crate::Error> {
        let gl = self
            .gl
            .as_ref()
            .ok_or_else(|| crate::Error::Cursor("no window to warp in".to_string()))?;
        gl.window
            .set_cursor_position(PhysicalPosition::new(x, y))
            .map_err(|e| crate::Error::Cursor(e.to_string()))
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        if let Some(gl) = &self.gl {
            gl.window.set_cursor_visible(visible);
        }
    }

    fn swap_buffers(&mut self) -> Result<(), crate::Error> {
        let gl = self
            .gl
            .as_ref()
            .ok_or_else(|| crate::Error::Present("no surface to present".to_string()))?;
        gl.surface
            .swap_buffers(&gl.context)
            .map_err(|e| crate::Error::Present(e.to_string()))
    }

    fn shutdown(&mut self) {
        if self.gl.take().is_some() {
            log::debug!("Released GL context and window");
        }
        self.queue.clear();
    }
}

/// The candidate whose sample count is closest to `wanted`; first wins ties
fn closest_by_samples<C>(
    candidates: impl Iterator<Item = C>,
    samples: impl Fn(&C) -> u8,
    wanted: u8,
) -> Option<C> {
    candidates.min_by_key(|candidate| samples(candidate).abs_diff(wanted))
}

#[cfg(target_os = "windows")]
fn display_preference(window: Option<&Window>) -> DisplayApiPreference {
    DisplayApiPreference::Wgl(window.map(|window| window.raw_window_handle()))
}

#[cfg(target_os = "macos")]
fn display_preference(_window: Option<&Window>) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

#[cfg(target_os = "android")]
fn display_preference(_window: Option<&Window>) -> DisplayApiPreference {
    DisplayApiPreference::Egl
}

#[cfg(all(
    unix,
    not(any(target_os = "macos", target_os = "ios", target_os = "android"))
))]
fn display_preference(_window: Option<&Window>) -> DisplayApiPreference {
    DisplayApiPreference::EglThenGlx(Box::new(winit::platform::x11::register_xlib_error_hook))
}

/// Translate one winit window event. `cursor` tracks the last pointer
/// position since winit reports button changes without coordinates.
fn translate_window_event(
    event: WindowEvent,
    cursor: &mut (i32, i32),
    key_repeat: bool,
) -> Option<RawEvent> {
    match event {
        WindowEvent::CloseRequested => Some(RawEvent::Quit),
        WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
            Some(RawEvent::Resize {
                width: size.width,
                height: size.height,
            })
        }
        WindowEvent::KeyboardInput { event, .. } => {
            if event.repeat && !key_repeat {
                return None;
            }
            let sym = key_sym(&event)?;
            Some(match event.state {
                ElementState::Pressed => RawEvent::KeyDown(sym),
                ElementState::Released => RawEvent::KeyUp(sym),
            })
        }
        WindowEvent::CursorMoved { position, .. } => {
            *cursor = (position.x as i32, position.y as i32);
            Some(RawEvent::MouseMotion {
                x: cursor.0,
                y: cursor.1,
            })
        }
        WindowEvent::MouseInput { state, button, .. } => Some(RawEvent::MouseButton {
            button: button_id(button),
            pressed: state == ElementState::Pressed,
            x: cursor.0,
            y: cursor.1,
        }),
        _ => None,
    }
}

fn key_sym(event: &KeyEvent) -> Option<KeySym> {
    if let PhysicalKey::Code(code) = event.physical_key {
        let special = match code {
            KeyCode::ArrowUp => Some(KeySym::UP),
            KeyCode::ArrowDown => Some(KeySym::DOWN),
            KeyCode::ArrowLeft => Some(KeySym::LEFT),
            KeyCode::ArrowRight => Some(KeySym::RIGHT),
            KeyCode::NumpadAdd => Some(KeySym::KP_PLUS),
            KeyCode::NumpadSubtract => Some(KeySym::KP_MINUS),
            KeyCode::ShiftLeft => Some(KeySym::LSHIFT),
            KeyCode::ShiftRight => Some(KeySym::RSHIFT),
            KeyCode::ControlLeft => Some(KeySym::LCTRL),
            KeyCode::ControlRight => Some(KeySym::RCTRL),
            _ => None,
        };
        if special.is_some() {
            return special;
        }
    }

    match event.key_without_modifiers() {
        Key::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if (c as u32) < 0x100 => Some(KeySym(c as u32)),
                _ => None,
            }
        }
        Key::Named(named) => named_key_sym(named),
        _ => None,
    }
}

// Control characters for the named keys that have one
fn named_key_sym(key: NamedKey) -> Option<KeySym> {
    let code = match key {
        NamedKey::Backspace => 0x08,
        NamedKey::Tab => 0x09,
        NamedKey::Enter => 0x0D,
        NamedKey::Escape => 0x1B,
        NamedKey::Space => 0x20,
        NamedKey::Delete => 0x7F,
        _ => return None,
    };
    Some(KeySym(code))
}

fn button_id(button: MouseButton) -> ButtonId {
    match button {
        MouseButton::Left => ButtonId::LEFT,
        MouseButton::Middle => ButtonId::MIDDLE,
        MouseButton::Right => ButtonId::RIGHT,
        MouseButton::Back => ButtonId(8),
        MouseButton::Forward => ButtonId(9),
        MouseButton::Other(n) => ButtonId(u8::try_from(n).unwrap_or(u8::MAX)),
    }
}
