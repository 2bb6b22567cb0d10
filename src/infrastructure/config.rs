//! Configuration management

use crate::domain::TagSettings;
use crate::error::{FmTagsError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the workspace metadata directory
pub const WORKSPACE_DIR: &str = ".fmtags";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,

    #[serde(default)]
    pub tags: TagSettings,
}

impl Config {
    /// Create a new config with default tag settings
    pub fn new() -> Self {
        Config {
            created: Utc::now(),
            tags: TagSettings::default(),
        }
    }

    /// Load config from .fmtags/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(WORKSPACE_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FmTagsError::NotWorkspace(path.to_path_buf())
            } else {
                FmTagsError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| FmTagsError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .fmtags/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let workspace_dir = path.join(WORKSPACE_DIR);
        let config_path = workspace_dir.join("config.toml");

        if !workspace_dir.exists() {
            fs::create_dir(&workspace_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| FmTagsError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Reject settings the codec cannot work with
    pub fn validate(&self) -> Result<()> {
        let separator = &self.tags.hierarchy_separator;
        if separator.is_empty() {
            return Err(FmTagsError::Config(
                "hierarchy_separator must not be empty".to_string(),
            ));
        }
        if separator.chars().any(char::is_whitespace) {
            return Err(FmTagsError::Config(format!(
                "hierarchy_separator must not contain whitespace: '{}'",
                separator
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}
