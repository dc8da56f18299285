//! Stats use case

use crate::domain::TagUsage;
use crate::error::Result;
use crate::infrastructure::TagStore;

/// Database counts and averages.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub tags: u64,
    pub values: u64,
    pub files: u64,
    pub taggings: u64,
    pub tags_per_file: f64,
    pub files_per_tag: f64,
    /// Present when usage was requested.
    pub usage: Option<Vec<TagUsage>>,
}

fn average(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

pub fn collect_stats<S: TagStore + ?Sized>(store: &S, usage: bool) -> Result<Stats> {
    let tags = store.tag_count()?;
    let values = store.value_count()?;
    let files = store.file_count()?;
    let taggings = store.tagging_count()?;

    Ok(Stats {
        tags,
        values,
        files,
        taggings,
        tags_per_file: average(taggings, files),
        files_per_tag: average(taggings, tags),
        usage: if usage {
            Some(store.tag_usage()?)
        } else {
            None
        },
    })
}
