//! Client configuration.
//!
//! Everything here is resolved once when a [`crate::Client`] is built and is
//! immutable afterwards.

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::envelope::{FractionStyle, LibraryInfo};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("utc offset out of range: {0} seconds")]
    InvalidOffset(i32),

    #[error("library {0} must not be empty")]
    EmptyLibraryField(&'static str),

    #[error("malformed client config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Identity injected as `context.library` on every envelope.
    #[serde(default)]
    pub library: LibraryInfo,

    /// Offset rendered on timestamps (default: UTC, `+00:00`).
    #[serde(default)]
    pub utc_offset_seconds: i32,

    #[serde(default)]
    pub fraction_style: FractionStyle,
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.offset()?;
        if self.library.name.trim().is_empty() {
            return Err(ConfigError::EmptyLibraryField("name"));
        }
        if self.library.version.trim().is_empty() {
            return Err(ConfigError::EmptyLibraryField("version"));
        }
        Ok(())
    }

    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or(ConfigError::InvalidOffset(self.utc_offset_seconds))
    }
}
