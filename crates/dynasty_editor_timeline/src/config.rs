// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine configuration.
//!
//! Settings are stored as RON. Missing fields fall back to their defaults so
//! older files keep loading as settings are added.

use crate::error::ConfigError;
use crate::project::AspectRatio;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "dynasty.ron";

/// Defaults applied to newly created projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    /// Project name
    pub name: String,
    /// Project length in seconds
    pub duration: f64,
    /// Output frame shape
    pub aspect_ratio: AspectRatio,
    /// Frames per second
    pub fps: f64,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            duration: 30.0,
            aspect_ratio: AspectRatio::Portrait,
            fps: 30.0,
        }
    }
}

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Defaults for new projects
    pub new_project: ProjectDefaults,
    /// Rate of the preview frame loop, in callbacks per second
    pub preview_frame_rate: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            new_project: ProjectDefaults::default(),
            preview_frame_rate: 60.0,
        }
    }
}

impl EngineConfig {
    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Parse from RON
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&source)?;
        tracing::debug!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// Save to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        tracing::debug!(path = %path.display(), "Saved engine config");
        Ok(())
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }
}
