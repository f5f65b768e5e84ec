// config.rs - Simulation configuration loaded from TOML

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Grid size and optional seed pattern.
///
/// ```toml
/// width = 64
/// height = 64
/// pattern = "xq4_153"
/// ```
///
/// Leaving `pattern` out seeds the grid from noise instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LifeConfig {
    pub width: u32,
    pub height: u32,
    /// Apgcode to place at the grid center.
    pub pattern: Option<String>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            pattern: None,
        }
    }
}

impl LifeConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pattern: None }
    }

    #[must_use]
    pub fn with_pattern<S: Into<String>>(mut self, pattern: S) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }
}
