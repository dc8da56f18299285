//! Untag use case
//!
//! Removes taggings from a batch of files. Every path and every tag
//! specifier is judged on its own: an unknown file, tag or value, or a
//! tagging that is missing or only held through an implication, is reported
//! as a warning and the batch carries on. Storage failures abort the batch
//! and, since the transaction is then dropped uncommitted, roll it back.
//!
//! The implication check re-queries after a failed delete. That is only
//! sound while a single writer holds the database, which the enclosing
//! transaction guarantees for SQLite.

use crate::application::taggings::{delete_tagging, tagging_exists};
use crate::application::values::{delete_unused_values, value_by_name, ValueLookup};
use crate::domain::{File, TagSpecifier, ValueId};
use crate::error::{Result, TagshelfError};
use crate::infrastructure::{Database, TagStore};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// A per-item problem that did not stop the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntagWarning {
    /// No file is registered at the path.
    UnknownFile { path: PathBuf },
    UnknownTag { name: String },
    UnknownValue { name: String },
    /// The file does not carry the tagging at all.
    NotTagged {
        path: PathBuf,
        specifier: TagSpecifier,
    },
    /// The tagging is only held through an implication.
    Implied {
        path: PathBuf,
        specifier: TagSpecifier,
    },
}

impl UntagWarning {
    /// The path or name the warning is about.
    pub fn target(&self) -> String {
        match self {
            UntagWarning::UnknownFile { path }
            | UntagWarning::NotTagged { path, .. }
            | UntagWarning::Implied { path, .. } => path.display().to_string(),
            UntagWarning::UnknownTag { name } | UntagWarning::UnknownValue { name } => {
                name.clone()
            }
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            UntagWarning::UnknownFile { .. } => "unknown-file",
            UntagWarning::UnknownTag { .. } => "unknown-tag",
            UntagWarning::UnknownValue { .. } => "unknown-value",
            UntagWarning::NotTagged { .. } => "not-tagged",
            UntagWarning::Implied { .. } => "implied",
        }
    }
}

impl fmt::Display for UntagWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UntagWarning::UnknownFile { path } => {
                write!(f, "{}: file is not tagged", path.display())
            }
            UntagWarning::UnknownTag { name } => write!(f, "no such tag '{}'", name),
            UntagWarning::UnknownValue { name } => write!(f, "no such value '{}'", name),
            UntagWarning::NotTagged { path, specifier } => {
                write!(f, "{}: file is not tagged '{}'", path.display(), specifier)
            }
            UntagWarning::Implied { path, specifier } => write!(
                f,
                "{}: cannot remove '{}': delete the implication to remove this tag",
                path.display(),
                specifier
            ),
        }
    }
}

/// What a batch did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UntagReport {
    /// Files considered, including recursively expanded ones.
    pub files: usize,
    pub removed: usize,
    /// Values referenced by removed taggings; candidates for the sweep.
    pub released_values: BTreeSet<ValueId>,
    pub values_deleted: usize,
    /// In the order they were raised.
    pub warnings: Vec<UntagWarning>,
}

impl UntagReport {
    pub fn had_errors(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn warn(&mut self, warning: UntagWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// Strip every tagging from each path (and, if `recursive`, from every file
/// below it).
pub fn untag_all<S: TagStore + ?Sized>(
    store: &S,
    paths: &[PathBuf],
    recursive: bool,
) -> Result<UntagReport> {
    let mut report = UntagReport::default();

    for path in paths {
        let Some(file) = store.file_by_path(path)? else {
            report.warn(UntagWarning::UnknownFile { path: path.clone() });
            continue;
        };

        strip_file(store, &file, &mut report)?;

        if recursive {
            for child in store.files_by_directory(&file.path)? {
                strip_file(store, &child, &mut report)?;
            }
        }
    }

    Ok(report)
}

fn strip_file<S: TagStore + ?Sized>(store: &S, file: &File, report: &mut UntagReport) -> Result<()> {
    info!("{}: removing all tags", file.path.display());

    report.released_values.extend(
        store
            .taggings_by_file(file.id)?
            .into_iter()
            .filter_map(|tagging| tagging.value_id),
    );
    report.removed += store.delete_taggings_by_file(file.id)?;
    report.files += 1;
    Ok(())
}

/// Remove the specified taggings from each path (and, if `recursive`, from
/// every file below it).
///
/// Specifiers are the outer loop and files the inner one, which fixes the
/// order warnings are raised in. Files reached from several recursive roots
/// are visited once per root.
pub fn untag_tags<S: TagStore + ?Sized>(
    store: &S,
    paths: &[PathBuf],
    specifiers: &[TagSpecifier],
    recursive: bool,
) -> Result<UntagReport> {
    let mut report = UntagReport::default();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(file) = store.file_by_path(path)? else {
            report.warn(UntagWarning::UnknownFile { path: path.clone() });
            continue;
        };

        let children = if recursive {
            store.files_by_directory(&file.path)?
        } else {
            Vec::new()
        };
        files.push(file);
        files.extend(children);
    }
    report.files = files.len();

    for specifier in specifiers {
        let Some(tag) = store.tag_by_name(&specifier.tag)? else {
            report.warn(UntagWarning::UnknownTag {
                name: specifier.tag.clone(),
            });
            continue;
        };

        let value = match value_by_name(store, specifier.value_name())? {
            ValueLookup::Unvalued => None,
            ValueLookup::Found(value) => Some(value),
            ValueLookup::Missing => {
                report.warn(UntagWarning::UnknownValue {
                    name: specifier.value_name().to_string(),
                });
                continue;
            }
        };
        let value_id = value.as_ref().map(|value| value.id);
        let resolved = TagSpecifier::new(tag.name.clone(), value.map(|value| value.name));

        for file in &files {
            match delete_tagging(store, file.id, tag.id, value_id) {
                Ok(()) => {
                    report.removed += 1;
                    report.released_values.extend(value_id);
                }
                Err(TagshelfError::TaggingNotFound { .. }) => {
                    let path = file.path.clone();
                    let specifier = resolved.clone();
                    if tagging_exists(store, file.id, tag.id, value_id, true)? {
                        report.warn(UntagWarning::Implied { path, specifier });
                    } else {
                        report.warn(UntagWarning::NotTagged { path, specifier });
                    }
                }
                Err(err) => return Err(err),
            }
        }
    }

    Ok(report)
}

/// Which taggings an untag request removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntagTarget {
    All,
    Tags(Vec<TagSpecifier>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntagRequest {
    /// Absolute paths.
    pub paths: Vec<PathBuf>,
    pub target: UntagTarget,
    pub recursive: bool,
}

/// Run an untag request in one transaction.
///
/// Values released by the removals are swept before committing. The
/// transaction commits even when the report carries warnings.
pub fn untag(database: &mut Database, request: &UntagRequest) -> Result<UntagReport> {
    if request.paths.is_empty() {
        return Err(TagshelfError::Usage(
            "at least one file to untag must be specified".to_string(),
        ));
    }

    let tx = database.begin()?;

    let mut report = match &request.target {
        UntagTarget::All => untag_all(&tx, &request.paths, request.recursive)?,
        UntagTarget::Tags(specifiers) => {
            if specifiers.is_empty() {
                return Err(TagshelfError::Usage(
                    "set of tags to remove must be specified".to_string(),
                ));
            }
            untag_tags(&tx, &request.paths, specifiers, request.recursive)?
        }
    };

    let candidates: Vec<ValueId> = report.released_values.iter().copied().collect();
    report.values_deleted = delete_unused_values(&tx, &candidates)?;

    tx.commit()?;
    Ok(report)
}
