//! Application layer - Use cases and orchestration

pub mod imply;
pub mod init;
pub mod manage_config;
pub mod stats;
pub mod tag;
pub mod taggings;
pub mod untag;
pub mod values;

pub use manage_config::ConfigService;
pub use stats::{collect_stats, Stats};
pub use tag::{TagReport, TagRequest, TagWarning};
pub use untag::{UntagReport, UntagRequest, UntagTarget, UntagWarning};
pub use values::ValueLookup;
