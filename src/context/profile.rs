// Context profiles selected at build time

use super::{GraphicsApi, SurfaceRequest};
use crate::config::ShellConfig;

/// Capability sets a build asks the backend for
pub trait ContextProfile {
    /// Profile name used in logs
    fn name(&self) -> &'static str;

    /// The enhanced request tried first
    fn initial_request(&self, config: &ShellConfig) -> SurfaceRequest;

    /// Reduced request to retry with after `failed` was rejected, if any
    fn degrade(&self, failed: &SurfaceRequest) -> Option<SurfaceRequest>;
}

/// Desktop OpenGL: resizable, double-buffered, multisampled when possible
#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopGl;

impl ContextProfile for DesktopGl {
    fn name(&self) -> &'static str {
        "desktop OpenGL"
    }

    fn initial_request(&self, config: &ShellConfig) -> SurfaceRequest {
        SurfaceRequest {
            width: config.width,
            height: config.height,
            double_buffer: true,
            samples: config.samples,
            depth_bits: 16,
            api: GraphicsApi::OpenGl,
            fullscreen: false,
        }
    }

    fn degrade(&self, failed: &SurfaceRequest) -> Option<SurfaceRequest> {
        if !failed.is_multisampled() {
            return None;
        }
        Some(SurfaceRequest {
            samples: 0,
            ..*failed
        })
    }
}

/// Embedded OpenGL ES 1.1 on a fullscreen surface.
///
/// Multisampling is never requested, so there is nothing to degrade to.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedGles;

impl ContextProfile for EmbeddedGles {
    fn name(&self) -> &'static str {
        "embedded GLES"
    }

    fn initial_request(&self, config: &ShellConfig) -> SurfaceRequest {
        SurfaceRequest {
            width: config.width,
            height: config.height,
            double_buffer: true,
            samples: 0,
            depth_bits: 24,
            api: GraphicsApi::Gles { major: 1, minor: 1 },
            fullscreen: true,
        }
    }

    fn degrade(&self, _failed: &SurfaceRequest) -> Option<SurfaceRequest> {
        None
    }
}

/// Profile for this build's configuration
pub fn default_profile() -> Box<dyn ContextProfile> {
    #[cfg(feature = "gles")]
    {
        Box::new(EmbeddedGles)
    }
    #[cfg(not(feature = "gles"))]
    {
        Box::new(DesktopGl)
    }
}
