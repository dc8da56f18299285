//! Config management use case

use crate::error::{Result, TagshelfError};
use crate::infrastructure::{Config, Repository, ShelfRepository};

const VALID_KEYS: &str = "auto_create_tags, auto_create_values, created";

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(TagshelfError::Config(format!(
            "Invalid value for '{}': '{}'. Expected true or false",
            key, value
        ))),
    }
}

/// Service for managing tagshelf configuration
pub struct ConfigService {
    repository: Repository,
}

impl ConfigService {
    pub fn new(repository: Repository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "auto_create_tags" => Ok(config.auto_create_tags.to_string()),
            "auto_create_values" => Ok(config.auto_create_values.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(TagshelfError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "auto_create_tags" => config.auto_create_tags = parse_flag(key, value)?,
            "auto_create_values" => config.auto_create_values = parse_flag(key, value)?,
            "created" => {
                return Err(TagshelfError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(TagshelfError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: auto_create_tags, auto_create_values",
                    key
                )));
            }
        }

        self.repository.save_config(&config)
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
