//! Config management use case

use crate::error::{FmTagsError, Result};
use crate::infrastructure::{Config, FileSystemRepository, WorkspaceRepository};

/// Keys accepted by `fmtags config`
pub const CONFIG_KEYS: &[&str] = &["use_three_dash_closing", "hierarchy_separator", "created"];

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "use_three_dash_closing" => Ok(config.tags.use_three_dash_closing.to_string()),
            "hierarchy_separator" => Ok(config.tags.hierarchy_separator.clone()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "use_three_dash_closing" => {
                config.tags.use_three_dash_closing = parse_bool(value)?;
            }
            "hierarchy_separator" => {
                config.tags.hierarchy_separator = value.to_string();
            }
            "created" => {
                return Err(FmTagsError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }

        config.validate()?;
        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

fn unknown_key(key: &str) -> FmTagsError {
    FmTagsError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(FmTagsError::Config(format!(
            "Invalid boolean: '{}'. Use true or false",
            value
        ))),
    }
}
