//! Drag-and-drop configuration.

use std::path::Path;

use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::DEFAULT_CHROME_OFFSET;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "CROSSDROP_CONFIG";

/// Default preview window size in density-independent units.
pub const DEFAULT_PREVIEW_SIZE: Size = Size::new(200.0, 150.0);

/// Default pointer travel (physical pixels) before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 4.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables shared by the coordinator, the gesture recognizer and the
/// preview surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Vertical distance between a window's outer origin and its content
    /// area, in density-independent units. Approximates the title bar.
    pub chrome_offset: f64,
    /// Size of the floating preview, in density-independent units.
    pub preview_size: Size,
    /// Pointer travel in physical pixels before a press turns into a drag.
    pub drag_threshold: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            chrome_offset: DEFAULT_CHROME_OFFSET,
            preview_size: DEFAULT_PREVIEW_SIZE,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl DragConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded drag config from {:?}", path);
        Ok(config)
    }

    /// Load the file named by [`CONFIG_ENV`], or the defaults if unset.
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject negative or non-finite values.
    pub fn validate(&self) -> ConfigResult<()> {
        let checks = [
            ("chrome_offset", self.chrome_offset),
            ("preview_size.width", self.preview_size.width),
            ("preview_size.height", self.preview_size.height),
            ("drag_threshold", self.drag_threshold),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{name} = {value}")));
            }
        }
        Ok(())
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
