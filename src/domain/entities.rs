//! Stored entities and their identities

use std::fmt;
use std::path::PathBuf;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identity of a registered file
    FileId
);
entity_id!(
    /// Identity of a tag
    TagId
);
entity_id!(
    /// Identity of a persisted value. "No value" is `Option::None`, never an id.
    ValueId
);

/// A file or directory known to the database, keyed by absolute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub id: FileId,
    pub path: PathBuf,
    pub is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub id: ValueId,
    pub name: String,
}

/// An explicit assertion that a file carries `tag[=value]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tagging {
    pub file_id: FileId,
    pub tag_id: TagId,
    pub value_id: Option<ValueId>,
}

/// Holding `tag[=value]` implies holding `implied_tag[=implied_value]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Implication {
    pub tag_id: TagId,
    pub value_id: Option<ValueId>,
    pub implied_tag_id: TagId,
    pub implied_value_id: Option<ValueId>,
}

/// Number of files carrying a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagUsage {
    pub name: String,
    pub file_count: u64,
}
