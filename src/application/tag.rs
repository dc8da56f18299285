//! Tag use case

use crate::application::taggings::add_tagging;
use crate::application::values::{add_value, value_by_name, ValueLookup};
use crate::domain::{validate_name, File, NameError, ReservedVocabulary, Tag, TagSpecifier, Value};
use crate::error::{Result, TagshelfError};
use crate::infrastructure::{Config, Database, TagStore};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// A per-item problem that did not stop the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagWarning {
    /// Nothing exists on disk at the path.
    MissingPath { path: PathBuf },
    UnknownTag { name: String },
    UnknownValue { name: String },
    InvalidTagName { name: String, reason: NameError },
    InvalidValueName { name: String, reason: NameError },
    /// Part of a directory could not be read during a recursive walk.
    Unreadable { path: PathBuf, reason: String },
}

impl fmt::Display for TagWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagWarning::MissingPath { path } => {
                write!(f, "{}: no such file or directory", path.display())
            }
            TagWarning::UnknownTag { name } => write!(f, "no such tag '{}'", name),
            TagWarning::UnknownValue { name } => write!(f, "no such value '{}'", name),
            TagWarning::InvalidTagName { name, reason } => {
                write!(f, "invalid tag name '{}': {}", name, reason)
            }
            TagWarning::InvalidValueName { name, reason } => {
                write!(f, "invalid value name '{}': {}", name, reason)
            }
            TagWarning::Unreadable { path, reason } => {
                write!(f, "{}: cannot read: {}", path.display(), reason)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagReport {
    pub files: usize,
    /// Taggings newly recorded; already present ones are not counted.
    pub added: usize,
    pub warnings: Vec<TagWarning>,
}

impl TagReport {
    pub fn had_errors(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn warn(&mut self, warning: TagWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOptions {
    pub recursive: bool,
    pub auto_create_tags: bool,
    pub auto_create_values: bool,
}

impl TagOptions {
    pub fn from_config(config: &Config, recursive: bool) -> Self {
        TagOptions {
            recursive,
            auto_create_tags: config.auto_create_tags,
            auto_create_values: config.auto_create_values,
        }
    }
}

/// Result of resolving a name that may have to be created.
pub(crate) enum Resolved<T> {
    Found(T),
    Unknown,
    Invalid(NameError),
}

/// Validate `name` as a tag name and persist it.
pub fn add_tag<S: TagStore + ?Sized>(store: &S, name: &str) -> Result<Tag> {
    validate_name(name, &ReservedVocabulary::query_grammar()).map_err(|reason| {
        TagshelfError::InvalidTagName {
            name: name.to_string(),
            reason,
        }
    })?;
    store.insert_tag(name)
}

pub(crate) fn resolve_tag<S: TagStore + ?Sized>(
    store: &S,
    name: &str,
    create: bool,
) -> Result<Resolved<Tag>> {
    if let Some(tag) = store.tag_by_name(name)? {
        return Ok(Resolved::Found(tag));
    }
    if !create {
        return Ok(Resolved::Unknown);
    }

    match add_tag(store, name) {
        Ok(tag) => Ok(Resolved::Found(tag)),
        Err(TagshelfError::InvalidTagName { reason, .. }) => Ok(Resolved::Invalid(reason)),
        Err(err) => Err(err),
    }
}

pub(crate) fn resolve_value<S: TagStore + ?Sized>(
    store: &S,
    name: &str,
    create: bool,
) -> Result<Resolved<Option<Value>>> {
    match value_by_name(store, name)? {
        ValueLookup::Unvalued => Ok(Resolved::Found(None)),
        ValueLookup::Found(value) => Ok(Resolved::Found(Some(value))),
        ValueLookup::Missing if !create => Ok(Resolved::Unknown),
        ValueLookup::Missing => match add_value(store, name) {
            Ok(value) => Ok(Resolved::Found(Some(value))),
            Err(TagshelfError::InvalidValueName { reason, .. }) => Ok(Resolved::Invalid(reason)),
            Err(err) => Err(err),
        },
    }
}

/// Resolve both halves of a specifier, recording warnings for what fails.
fn resolve_specifier<S: TagStore + ?Sized>(
    store: &S,
    specifier: &TagSpecifier,
    options: &TagOptions,
    report: &mut TagReport,
) -> Result<Option<(Tag, Option<Value>)>> {
    let tag = match resolve_tag(store, &specifier.tag, options.auto_create_tags)? {
        Resolved::Found(tag) => tag,
        Resolved::Unknown => {
            report.warn(TagWarning::UnknownTag {
                name: specifier.tag.clone(),
            });
            return Ok(None);
        }
        Resolved::Invalid(reason) => {
            report.warn(TagWarning::InvalidTagName {
                name: specifier.tag.clone(),
                reason,
            });
            return Ok(None);
        }
    };

    let name = specifier.value_name();
    let value = match resolve_value(store, name, options.auto_create_values)? {
        Resolved::Found(value) => value,
        Resolved::Unknown => {
            report.warn(TagWarning::UnknownValue {
                name: name.to_string(),
            });
            return Ok(None);
        }
        Resolved::Invalid(reason) => {
            report.warn(TagWarning::InvalidValueName {
                name: name.to_string(),
                reason,
            });
            return Ok(None);
        }
    };

    Ok(Some((tag, value)))
}

fn register_file<S: TagStore + ?Sized>(store: &S, path: &Path, is_dir: bool) -> Result<File> {
    match store.file_by_path(path)? {
        Some(file) => Ok(file),
        None => store.insert_file(path, is_dir),
    }
}

/// Files below `dir`, skipping hidden directories such as `.tagshelf`.
/// Entries that cannot be read are reported and skipped.
fn walk_directory<S: TagStore + ?Sized>(
    store: &S,
    dir: &Path,
    report: &mut TagReport,
) -> Result<Vec<File>> {
    let walker = WalkDir::new(dir).min_depth(1).into_iter().filter_entry(|entry| {
        !entry.file_type().is_dir()
            || entry
                .file_name()
                .to_str()
                .is_none_or(|name| !name.starts_with('.'))
    });

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err.path().unwrap_or(dir).to_path_buf();
                let reason = match err.io_error() {
                    Some(io) => io.to_string(),
                    None => err.to_string(),
                };
                report.warn(TagWarning::Unreadable { path, reason });
                continue;
            }
        };
        files.push(register_file(
            store,
            entry.path(),
            entry.file_type().is_dir(),
        )?);
    }
    Ok(files)
}

/// Apply every specifier to each path (and, if `recursive`, to everything
/// below it), registering files as needed.
pub fn tag_paths<S: TagStore + ?Sized>(
    store: &S,
    paths: &[PathBuf],
    specifiers: &[TagSpecifier],
    options: &TagOptions,
) -> Result<TagReport> {
    let mut report = TagReport::default();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                report.warn(TagWarning::MissingPath { path: path.clone() });
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        files.push(register_file(store, path, metadata.is_dir())?);
        if options.recursive && metadata.is_dir() {
            files.extend(walk_directory(store, path, &mut report)?);
        }
    }
    report.files = files.len();

    // Nothing to tag: creating tags or values now would leave them orphaned.
    if files.is_empty() {
        return Ok(report);
    }

    let mut pairs = Vec::with_capacity(specifiers.len());
    for specifier in specifiers {
        if let Some(pair) = resolve_specifier(store, specifier, options, &mut report)? {
            pairs.push(pair);
        }
    }

    for file in &files {
        info!("{}: applying tags", file.path.display());
        for (tag, value) in &pairs {
            if add_tagging(store, file.id, tag.id, value.as_ref().map(|value| value.id))? {
                report.added += 1;
            }
        }
    }

    Ok(report)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRequest {
    /// Absolute paths.
    pub paths: Vec<PathBuf>,
    pub specifiers: Vec<TagSpecifier>,
    pub recursive: bool,
}

/// Run a tag request in one transaction; commits even with warnings.
pub fn tag(database: &mut Database, config: &Config, request: &TagRequest) -> Result<TagReport> {
    if request.paths.is_empty() {
        return Err(TagshelfError::Usage(
            "at least one file to tag must be specified".to_string(),
        ));
    }
    if request.specifiers.is_empty() {
        return Err(TagshelfError::Usage(
            "set of tags to apply must be specified".to_string(),
        ));
    }

    let options = TagOptions::from_config(config, request.recursive);
    let tx = database.begin()?;
    let report = tag_paths(&tx, &request.paths, &request.specifiers, &options)?;
    tx.commit()?;
    Ok(report)
}
