//! Decode configuration.
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! unresolved = "raw"      # or "fail"
//!
//! [flatten]
//! enabled = true
//! on_error = "skip"       # or "fail"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_FLATTEN_ENABLED: bool = true;

/// What to do with a column whose wire type no rule recognizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedPolicy {
    /// Decode the column as nullable raw text
    #[default]
    Raw,
    /// Fail frame assembly
    Fail,
}

/// What to do when a JSON column cannot be flattened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlattenErrorPolicy {
    /// Leave the column as it is and keep going
    #[default]
    Skip,
    /// Propagate the error
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlattenConfig {
    /// Expand JSON columns of log frames into sub-fields
    #[serde(default = "default_flatten_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub on_error: FlattenErrorPolicy,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            enabled: default_flatten_enabled(),
            on_error: FlattenErrorPolicy::default(),
        }
    }
}

fn default_flatten_enabled() -> bool {
    DEFAULT_FLATTEN_ENABLED
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DecodeConfig {
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
    #[serde(default)]
    pub flatten: FlattenConfig,
}

impl DecodeConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
