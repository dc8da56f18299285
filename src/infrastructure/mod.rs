//! Infrastructure layer - External I/O and persistence

pub mod config;
pub mod repository;
pub mod storage;

pub use config::Config;
pub use repository::{Repository, ShelfRepository};
pub use storage::{Database, SqliteTransaction, TagStore};
