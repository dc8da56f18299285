//! Configuration management

use crate::error::{Result, TagshelfError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the directory holding the database and its configuration.
pub const SHELF_DIR: &str = ".tagshelf";

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Create unknown tags on `tag`/`imply` instead of warning
    #[serde(default = "default_true")]
    pub auto_create_tags: bool,
    /// Create unknown values on `tag`/`imply` instead of warning
    #[serde(default = "default_true")]
    pub auto_create_values: bool,
    pub created: DateTime<Utc>,
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            auto_create_tags: true,
            auto_create_values: true,
            created: Utc::now(),
        }
    }

    /// Load config from .tagshelf/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(SHELF_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TagshelfError::NotTagshelfDirectory(path.to_path_buf())
            } else {
                TagshelfError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| TagshelfError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .tagshelf/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let shelf_dir = path.join(SHELF_DIR);
        let config_path = shelf_dir.join("config.toml");

        if !shelf_dir.exists() {
            fs::create_dir(&shelf_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TagshelfError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
