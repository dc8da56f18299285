//! Domain layer - Entities, names and argument grammar

pub mod entities;
pub mod name;
pub mod specifier;

pub use entities::{File, FileId, Implication, Tag, TagId, TagUsage, Tagging, Value, ValueId};
pub use name::{validate_name, NameError, ReservedVocabulary};
pub use specifier::TagSpecifier;
