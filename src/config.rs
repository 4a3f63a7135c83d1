//! Shell configuration
//!
//! Configuration never comes from a file. Defaults can be overridden with
//! inline JSON in the `VIEWER_SHELL_CONFIG` environment variable.

use serde::Deserialize;

/// Environment variable holding inline JSON overrides
pub const CONFIG_ENV: &str = "VIEWER_SHELL_CONFIG";

/// Window and context settings used at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Window caption
    pub title: String,
    /// Initial surface width in pixels
    pub width: u32,
    /// Initial surface height in pixels
    pub height: u32,
    /// Multisample count for the first context attempt (0 disables the attempt)
    pub samples: u8,
    /// Deliver auto-repeated key presses
    pub key_repeat: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: "viewer".to_string(),
            width: 800,
            height: 600,
            samples: 4,
            key_repeat: false,
        }
    }
}

impl ShellConfig {
    /// Parse configuration from inline JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, crate::Error> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| crate::Error::Config(format!("invalid {CONFIG_ENV}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read overrides from the environment, or use defaults when unset
    pub fn from_env() -> Result<Self, crate::Error> {
        match std::env::var(CONFIG_ENV) {
            Ok(json) => Self::from_json(&json),
            Err(std::env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => Err(crate::Error::Config(format!("{CONFIG_ENV}: {e}"))),
        }
    }

    fn validate(&self) -> Result<(), crate::Error> {
        if self.width == 0 || self.height == 0 {
            return Err(crate::Error::Config(format!(
                "surface size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
