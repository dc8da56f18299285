//! Locating and initializing a tagshelf root

use crate::error::{Result, TagshelfError};
use crate::infrastructure::config::SHELF_DIR;
use crate::infrastructure::storage::Database;
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

const DATABASE_FILE: &str = "tagshelf.db";

/// Abstract access to the `.tagshelf` directory
pub trait ShelfRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .tagshelf/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .tagshelf/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .tagshelf directory exists
    fn is_initialized(&self) -> bool;

    /// Create .tagshelf directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of ShelfRepository
#[derive(Debug, Clone)]
pub struct Repository {
    pub root: PathBuf,
}

impl Repository {
    pub fn new(root: PathBuf) -> Self {
        Repository { root }
    }

    /// Discover the root by walking up from the current directory.
    /// TAGSHELF_ROOT takes precedence when set.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TAGSHELF_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_shelf_dir(&path) {
                return Ok(Repository::new(path));
            } else {
                return Err(TagshelfError::Config(format!(
                    "TAGSHELF_ROOT is set to '{}' but no .tagshelf directory found. \
                    Run 'tagshelf init' in that directory or unset TAGSHELF_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_shelf_dir(&current) {
                return Ok(Repository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(TagshelfError::NotTagshelfDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_shelf_dir(path: &Path) -> bool {
        path.join(SHELF_DIR).is_dir()
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join(SHELF_DIR).join(DATABASE_FILE)
    }

    /// Open (creating if needed) the database under this root.
    pub fn open_database(&self) -> Result<Database> {
        if !self.is_initialized() {
            return Err(TagshelfError::NotTagshelfDirectory(self.root.clone()));
        }
        Database::open(&self.database_path())
    }
}

impl ShelfRepository for Repository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_shelf_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let shelf_dir = self.root.join(SHELF_DIR);

        if shelf_dir.exists() {
            return Err(TagshelfError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&shelf_dir)?;
        Ok(())
    }
}
