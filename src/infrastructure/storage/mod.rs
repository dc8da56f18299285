//! Persistence gateway
//!
//! Every operation runs inside a transaction owned by the caller; nothing
//! here commits or rolls back on its own.

pub mod sqlite;

#[cfg(test)]
pub(crate) mod testing;

use crate::domain::{File, FileId, Implication, Tag, TagUsage, Tagging, Value, ValueId};
use crate::error::Result;
use std::path::Path;

pub use sqlite::{Database, SqliteTransaction};

/// Row-level access to files, tags, values, taggings and implications.
pub trait TagStore {
    fn file_by_path(&self, path: &Path) -> Result<Option<File>>;

    /// Every file whose path lies below `dir`, excluding `dir` itself.
    fn files_by_directory(&self, dir: &Path) -> Result<Vec<File>>;

    fn insert_file(&self, path: &Path, is_dir: bool) -> Result<File>;

    fn file_count(&self) -> Result<u64>;

    fn tag_by_name(&self, name: &str) -> Result<Option<Tag>>;

    fn insert_tag(&self, name: &str) -> Result<Tag>;

    fn tag_count(&self) -> Result<u64>;

    /// Files per tag, ordered by tag name.
    fn tag_usage(&self) -> Result<Vec<TagUsage>>;

    fn value_by_name(&self, name: &str) -> Result<Option<Value>>;

    /// All values ordered by name.
    fn values(&self) -> Result<Vec<Value>>;

    fn insert_value(&self, name: &str) -> Result<Value>;

    /// Delete the value row and any implication mentioning it. Taggings are
    /// left alone.
    fn delete_value(&self, id: ValueId) -> Result<()>;

    /// Delete each of `ids` that neither a tagging nor an implication
    /// references; returns how many went.
    fn delete_unused_values(&self, ids: &[ValueId]) -> Result<usize>;

    fn value_count(&self) -> Result<u64>;

    fn taggings_by_file(&self, file_id: FileId) -> Result<Vec<Tagging>>;

    fn taggings_by_value(&self, value_id: ValueId) -> Result<Vec<Tagging>>;

    fn tagging_count_by_value(&self, value_id: ValueId) -> Result<u64>;

    fn tagging_count(&self) -> Result<u64>;

    /// Implication rules naming the value on either side.
    fn implication_count_by_value(&self, value_id: ValueId) -> Result<u64>;

    /// With `include_implicit`, taggings derived through implications count too.
    fn tagging_exists(&self, tagging: &Tagging, include_implicit: bool) -> Result<bool>;

    /// Returns false when the explicit tagging was already present.
    fn insert_tagging(&self, tagging: &Tagging) -> Result<bool>;

    /// Returns false when no explicit row matched.
    fn delete_tagging(&self, tagging: &Tagging) -> Result<bool>;

    fn delete_taggings_by_file(&self, file_id: FileId) -> Result<usize>;

    /// Returns false when the rule was already present.
    fn insert_implication(&self, implication: &Implication) -> Result<bool>;
}
