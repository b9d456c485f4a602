//! Folio configuration file handling
//!
//! `folio.toml` tunes the book motion:
//!
//! ```toml
//! [motion]
//! entry_duration_ms = 320
//! entry_easing = "overshoot"
//! max_drag_progress = 0.25
//! ```
//!
//! Keys left out keep their defaults.

use anyhow::{Context, Result};
use folio_book::MotionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Contents of `folio.toml`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub motion: MotionConfig,
}

impl FolioConfig {
    /// Parse configuration source
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(source).context("Failed to parse folio config")?;
        config
            .motion
            .validate()
            .context("Invalid [motion] table")?;
        Ok(config)
    }

    /// Load an explicit config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Failed to load {}", path.display()))
    }

    /// Load `path` when given, else `folio.toml` if present, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            tracing::debug!("Using {}", fallback.display());
            return Self::load(fallback);
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FolioConfig::from_toml_str("").unwrap();
        assert_eq!(config.motion, MotionConfig::default());
    }

    #[test]
    fn test_motion_overrides() {
        let config = FolioConfig::from_toml_str(
            r#"
            [motion]
            entry_duration_ms = 320
            max_drag_progress = 0.25
            "#,
        )
        .unwrap();
        assert_eq!(config.motion.entry_duration_ms, 320.0);
        assert_eq!(config.motion.max_drag_progress, 0.25);
        assert_eq!(config.motion.exit_duration_ms, 140.0);
    }

    #[test]
    fn test_invalid_motion_is_an_error() {
        let err = FolioConfig::from_toml_str("[motion]\nmax_drag_progress = 2.0\n").unwrap_err();
        assert!(format!("{err:#}").contains("max_drag_progress"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = FolioConfig::load(Path::new("/nonexistent/folio.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
