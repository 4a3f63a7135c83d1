//! Rendering context negotiation
//!
//! A context is first requested with the profile's enhanced capability set
//! (multisampling on desktop). If the backend cannot create it, the profile
//! may offer a reduced request which is tried once; a second failure is
//! fatal. Resizes reuse whatever capability set was established and never
//! fall back.

pub mod profile;

pub use profile::{default_profile, ContextProfile, DesktopGl, EmbeddedGles};

use crate::config::ShellConfig;
use crate::platform::Backend;

/// Failure reported by a backend when a surface or context cannot be created
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("no framebuffer configuration matches {0}")]
    NoMatchingConfig(String),

    #[error("context creation failed: {0}")]
    Creation(String),

    #[error("cannot configure a {width}x{height} surface")]
    InvalidSize { width: u32, height: u32 },
}

/// Client API requested for the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsApi {
    /// Desktop OpenGL, any version
    OpenGl,
    /// OpenGL ES of the given version
    Gles { major: u8, minor: u8 },
}

/// Everything a backend needs to create or reconfigure the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceRequest {
    pub width: u32,
    pub height: u32,
    pub double_buffer: bool,
    /// Multisample count, 0 for none
    pub samples: u8,
    pub depth_bits: u8,
    pub api: GraphicsApi,
    pub fullscreen: bool,
}

impl SurfaceRequest {
    /// Same capability set at another size
    pub fn resized(&self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..*self
        }
    }

    /// Whether this request asks for multisampling
    pub fn is_multisampled(&self) -> bool {
        self.samples > 0
    }
}

impl std::fmt::Display for SurfaceRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)?;
        match self.api {
            GraphicsApi::OpenGl => write!(f, " OpenGL")?,
            GraphicsApi::Gles { major, minor } => write!(f, " GLES {major}.{minor}")?,
        }
        if self.double_buffer {
            write!(f, ", double-buffered")?;
        }
        if self.is_multisampled() {
            write!(f, ", {}x multisampling", self.samples)?;
        }
        if self.depth_bits > 0 {
            write!(f, ", {}-bit depth", self.depth_bits)?;
        }
        if self.fullscreen {
            write!(f, ", fullscreen")?;
        }
        Ok(())
    }
}

/// Result of the startup negotiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiated {
    /// The request the backend accepted
    pub request: SurfaceRequest,
    /// Why the enhanced request was abandoned, if it was
    pub degraded: Option<ContextError>,
}

/// Acquires the rendering context and keeps its capability set for resizes
pub struct Negotiator {
    profile: Box<dyn ContextProfile>,
    established: Option<SurfaceRequest>,
}

impl Negotiator {
    /// Create a negotiator for the given profile
    pub fn new(profile: Box<dyn ContextProfile>) -> Self {
        Self {
            profile,
            established: None,
        }
    }

    /// Create a negotiator for the profile selected at build time
    pub fn for_build() -> Self {
        Self::new(default_profile())
    }

    /// The capability set accepted at startup
    pub fn established(&self) -> Option<&SurfaceRequest> {
        self.established.as_ref()
    }

    /// Startup negotiation: try the enhanced request, degrade once if the
    /// profile allows it.
    pub fn establish(
        &mut self,
        backend: &mut dyn Backend,
        config: &ShellConfig,
    ) -> Result<Negotiated, crate::Error> {
        let preferred = self.profile.initial_request(config);
        log::debug!("Requesting {} surface: {}", self.profile.name(), preferred);

        let negotiated = match backend.configure_surface(&preferred) {
            Ok(()) => Negotiated {
                request: preferred,
                degraded: None,
            },
            Err(err) => {
                let reduced = match self.profile.degrade(&preferred) {
                    Some(reduced) => reduced,
                    None => return Err(err.into()),
                };
                log::warn!("{err}, retrying with {reduced}");
                backend.configure_surface(&reduced)?;
                Negotiated {
                    request: reduced,
                    degraded: Some(err),
                }
            }
        };

        log::info!("Rendering surface established: {}", negotiated.request);
        self.established = Some(negotiated.request);
        Ok(negotiated)
    }

    /// Resize path: same capability set, new size, no fallback
    pub fn reconfigure(
        &mut self,
        backend: &mut dyn Backend,
        width: u32,
        height: u32,
    ) -> Result<(), crate::Error> {
        let current = self.established.ok_or_else(|| {
            ContextError::Creation("resize before the context was established".to_string())
        })?;
        let request = current.resized(width, height);
        backend.configure_surface(&request)?;
        self.established = Some(request);
        Ok(())
    }
}
