//! tagshelf - Tag files with names and values
//!
//! Files are tagged with `TAG` or `TAG=VALUE` pairs held in a SQLite
//! database under a `.tagshelf` directory. Tags may imply other tags, and
//! values no tagging refers to any more are swept away after untagging.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TagshelfError;
