//! Process lifecycle and the fatal-error boundary
//!
//! [`run`] performs the startup sequence and drives the main loop. The
//! platform backend lives inside a [`Session`] whose drop tears it down, so
//! the context is released on every exit path, unwinding included.
//! [`launch`] wraps everything in the single recovery boundary of the
//! process and turns any failure into one user-visible message and a
//! non-zero exit status.

use std::any::Any;
use std::ffi::OsString;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use crate::app::Application;
use crate::config::ShellConfig;
use crate::context::Negotiator;
use crate::events::CursorGuard;
use crate::platform::{Backend, PlatformHost};
use crate::runloop::MainLoop;

/// Exit status after a quit event
pub const EXIT_CLEAN: u8 = 0;
/// Exit status after any fatal failure
pub const EXIT_FATAL: u8 = 1;

/// A failure that reached the top-level boundary
#[derive(Debug)]
pub enum Fatal {
    /// Structured error propagated from startup or the loop
    Error(crate::Error),
    /// Panic, with its message when one was attached
    Unknown(Option<String>),
}

impl Fatal {
    /// Process exit status for this failure
    pub fn exit_status(&self) -> u8 {
        EXIT_FATAL
    }
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fatal::Error(e) => write!(f, "{e}"),
            Fatal::Unknown(Some(message)) => write!(f, "unexpected failure: {message}"),
            Fatal::Unknown(None) => write!(f, "unknown exception"),
        }
    }
}

impl std::error::Error for Fatal {}

/// Owns the platform backend and shuts it down exactly once
pub struct Session {
    backend: Box<dyn Backend>,
    closed: bool,
}

impl Session {
    /// Take ownership of an initialized backend
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            closed: false,
        }
    }

    /// The backend, for negotiation and the main loop
    pub fn backend(&mut self) -> &mut dyn Backend {
        self.backend.as_mut()
    }

    /// Release the context and shut the platform down. Later calls do nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.backend.shutdown();
        log::info!("Platform backend '{}' shut down", self.backend.name());
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}

/// Startup sequence followed by the main loop.
///
/// `open` initializes the platform; its error should carry the platform's
/// own diagnostic text.
pub fn run<A, F>(
    app: &mut A,
    args: &[String],
    config: &ShellConfig,
    mut negotiator: Negotiator,
    open: F,
) -> Result<(), crate::Error>
where
    A: Application + ?Sized,
    F: FnOnce(&ShellConfig) -> Result<Box<dyn Backend>, crate::Error>,
{
    app.init(args)?;

    let backend = open(config)?;
    log::info!("Platform backend '{}' initialized", backend.name());
    let mut session = Session::new(backend);
    let guard = CursorGuard::new();

    let negotiated = negotiator.establish(session.backend(), config)?;
    {
        let mut host = PlatformHost::new(session.backend(), &guard);
        app.resize(
            &mut host,
            negotiated.request.width,
            negotiated.request.height,
        );
        app.init_gl(&mut host)?;
    }

    MainLoop::new(app, session.backend(), &mut negotiator, &guard).run()
}

/// Run `body` inside the recovery boundary.
///
/// Errors and panics both come back as [`Fatal`]. While `body` runs, panic
/// reports go to the log instead of the default stderr dump.
pub fn guarded<F>(body: F) -> Result<(), Fatal>
where
    F: FnOnce() -> Result<(), crate::Error>,
{
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|info| log::error!("{info}")));
    let outcome = panic::catch_unwind(AssertUnwindSafe(body));
    panic::set_hook(previous_hook);

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(Fatal::Error(e)),
        Err(payload) => Err(Fatal::Unknown(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(message) = payload.downcast_ref::<&str>() {
        Some((*message).to_string())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}

/// Process entry point: configuration, startup, main loop and fatal
/// reporting. Arguments are forwarded verbatim to [`Application::init`].
pub fn launch<A, F>(app: &mut A, open: F) -> ExitCode
where
    A: Application + ?Sized,
    F: FnOnce(&ShellConfig) -> Result<Box<dyn Backend>, crate::Error>,
{
    launch_with_args(app, std::env::args_os(), open)
}

/// [`launch`] with an explicit argument list, program name first
pub fn launch_with_args<A, I, F>(app: &mut A, args: I, open: F) -> ExitCode
where
    A: Application + ?Sized,
    I: IntoIterator<Item = OsString>,
    F: FnOnce(&ShellConfig) -> Result<Box<dyn Backend>, crate::Error>,
{
    let outcome = guarded(|| {
        let args = utf8_args(args)?;
        let config = ShellConfig::from_env()?;
        run(app, &args, &config, Negotiator::for_build(), open)
    });

    match outcome {
        Ok(()) => ExitCode::from(EXIT_CLEAN),
        Err(fatal) => {
            report_fatal(&fatal);
            ExitCode::from(fatal.exit_status())
        }
    }
}

fn utf8_args<I>(args: I) -> Result<Vec<String>, crate::Error>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|arg| {
                crate::Error::PlatformInit(format!("argument {arg:?} is not valid UTF-8"))
            })
        })
        .collect()
}

/// Show a fatal failure to the user, once
pub fn report_fatal(fatal: &Fatal) {
    let message = fatal.to_string();
    log::error!("Fatal error: {message}");
    show_fatal(&message);
}

#[cfg(target_os = "windows")]
fn show_fatal(message: &str) {
    use windows::core::{w, HSTRING};
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    unsafe {
        let _ = MessageBoxW(
            None,
            &HSTRING::from(message),
            w!("Fatal error"),
            MB_OK | MB_ICONERROR,
        );
    }
}

#[cfg(not(target_os = "windows"))]
fn show_fatal(message: &str) {
    eprintln!("Fatal error: {message}");
}

/// Install the default logger (`info`, overridable through `RUST_LOG`)
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::scripted::{BackendCall, ScriptedBackend};

    #[test]
    fn test_structured_error_is_fatal() {
        let fatal = guarded(|| Err(crate::Error::PlatformInit("no display".to_string())))
            .unwrap_err();
        assert!(matches!(fatal, Fatal::Error(crate::Error::PlatformInit(_))));
        assert_eq!(fatal.exit_status(), EXIT_FATAL);
        assert_eq!(fatal.to_string(), "Couldn't initialize platform: no display");
    }

    #[test]
    fn test_panic_is_classified_unknown() {
        let fatal = guarded(|| panic!("tile cache exploded")).unwrap_err();
        match fatal {
            Fatal::Unknown(Some(message)) => assert_eq!(message, "tile cache exploded"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_panic_without_message() {
        let fatal = guarded(|| std::panic::panic_any(42u32)).unwrap_err();
        assert!(matches!(fatal, Fatal::Unknown(None)));
        assert_eq!(fatal.to_string(), "unknown exception");
    }

    #[test]
    fn test_clean_body() {
        assert!(guarded(|| Ok(())).is_ok());
    }

    #[test]
    fn test_arguments_must_be_utf8() {
        let args = utf8_args([OsString::from("viewer"), OsString::from("--zoom")]).unwrap();
        assert_eq!(args, vec!["viewer".to_string(), "--zoom".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_is_structured_error() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![0xFF, 0xFE]);
        let err = utf8_args([OsString::from("viewer"), bad]).unwrap_err();
        assert!(matches!(err, crate::Error::PlatformInit(_)));
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_session_closes_once() {
        let (backend, calls) = ScriptedBackend::new();
        let mut session = Session::new(Box::new(backend));
        session.close();
        session.close();
        drop(session);
        assert_eq!(calls.count(&BackendCall::Shutdown), 1);
    }

    #[test]
    fn test_session_closes_on_unwind() {
        let (backend, calls) = ScriptedBackend::new();
        let fatal = guarded(|| {
            let _session = Session::new(Box::new(backend));
            panic!("render step failed");
        });
        assert!(fatal.is_err());
        assert_eq!(calls.count(&BackendCall::Shutdown), 1);
    }
}
