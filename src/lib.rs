// Core module of the viewer shell
pub mod app;
pub mod config;
pub mod context;
pub mod events;
pub mod lifecycle;
pub mod platform;
pub mod runloop;

/// Version of the viewer shell
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export of common types for convenience
pub mod prelude {
    pub use crate::app::{Application, Host};
    pub use crate::config::ShellConfig;
    pub use crate::context::{ContextProfile, Negotiator, SurfaceRequest};
    pub use crate::events::{Button, CursorGuard, InputEvent, Key, RawEvent};
    pub use crate::lifecycle::{launch, Fatal};
    pub use crate::platform::Backend;
    pub use crate::runloop::{LoopState, MainLoop};
    pub use crate::Error;
}

/// Errors that can occur in the viewer shell
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Couldn't initialize platform: {0}")]
    PlatformInit(String),

    #[error("Context error: {0}")]
    Context(#[from] context::ContextError),

    #[error("Presentation error: {0}")]
    Present(String),

    #[error("Cursor error: {0}")]
    Cursor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Application error: {0:#}")]
    Application(#[from] anyhow::Error),
}
