//! Initialize database use case

use crate::error::Result;
use crate::infrastructure::{Config, Repository, ShelfRepository};
use std::fs;
use std::path::Path;

/// Initialize a new tagshelf root at the specified path.
pub fn init(path: &Path) -> Result<Repository> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = Repository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::new())?;

    // Creates the schema
    repo.open_database()?;

    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_config_and_database() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("library");

        let repo = init(&root).unwrap();

        assert!(root.join(".tagshelf/config.toml").exists());
        assert!(repo.database_path().exists());
        assert!(repo.load_config().unwrap().auto_create_tags);
    }

    #[test]
    fn init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path()).unwrap();

        assert!(init(temp.path()).is_err());
    }
}
