//! Error types for tagshelf

use crate::domain::name::NameError;
use crate::domain::{FileId, TagId, ValueId};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tagshelf
#[derive(Debug, Error)]
pub enum TagshelfError {
    #[error("Not a tagshelf directory: {0}")]
    NotTagshelfDirectory(PathBuf),

    #[error("Invalid value name '{name}': {reason}")]
    InvalidValueName {
        name: String,
        #[source]
        reason: NameError,
    },

    #[error("Invalid tag name '{name}': {reason}")]
    InvalidTagName {
        name: String,
        #[source]
        reason: NameError,
    },

    #[error("Tagging not found: file {file_id}, tag {tag_id}, value {}", value_id.map_or(0, |id| id.0))]
    TaggingNotFound {
        file_id: FileId,
        tag_id: TagId,
        value_id: Option<ValueId>,
    },

    #[error("No such tag: {0}")]
    TagNotFound(String),

    #[error("No such value: {0}")]
    ValueNotFound(String),

    #[error("{0}")]
    Usage(String),

    /// Soft failures were already reported as warnings; carries no detail.
    #[error("")]
    ItemsFailed,

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TagshelfError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TagshelfError::NotTagshelfDirectory(_) => 2,
            TagshelfError::Usage(_) => 3,
            _ => 1,
        }
    }

    /// Whether the binary should print anything for this error.
    pub fn is_silent(&self) -> bool {
        matches!(self, TagshelfError::ItemsFailed)
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TagshelfError::NotTagshelfDirectory(path) => {
                format!(
                    "Not a tagshelf directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'tagshelf init' in this directory to create a new database\n\
                    • Navigate to a directory below an existing .tagshelf directory\n\
                    • Set TAGSHELF_ROOT environment variable to your database root",
                    path.display()
                )
            }
            TagshelfError::InvalidValueName { .. } | TagshelfError::InvalidTagName { .. } => {
                format!(
                    "{}\n\n\
                    Names may not be:\n\
                    • empty, '.' or '..'\n\
                    • a query operator: and, or, not, eq, ne, lt, gt, le, ge\n\
                    Names may not contain: ( ) , = ! < > / space or tab",
                    self
                )
            }
            TagshelfError::TagNotFound(tag) => {
                format!(
                    "No such tag: '{}'\n\n\
                    Suggestions:\n\
                    • Check your tag spelling (tag names are case-sensitive)\n\
                    • Use 'tagshelf stats --usage' to see the tags in use",
                    tag
                )
            }
            TagshelfError::ValueNotFound(value) => {
                format!(
                    "No such value: '{}'\n\n\
                    Suggestions:\n\
                    • Use 'tagshelf values' to see the values in use",
                    value
                )
            }
            TagshelfError::Usage(msg) => {
                format!(
                    "{}\n\n\
                    Examples:\n\
                    tagshelf tag mountain.jpg hill county=germany\n\
                    tagshelf untag mountain.jpg hill county=germany\n\
                    tagshelf untag --all mountain-copy.jpg\n\
                    tagshelf untag --tags \"river year=2015\" forest.jpg desert.jpg",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TagshelfError
pub type Result<T> = std::result::Result<T, TagshelfError>;
