//! Value lifecycle: creation, lookup, deletion and garbage collection

use crate::domain::{validate_name, ReservedVocabulary, Value, ValueId};
use crate::error::{Result, TagshelfError};
use crate::infrastructure::TagStore;
use tracing::{debug, warn};

/// Outcome of looking a value up by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueLookup {
    /// The empty name: a tag without a value.
    Unvalued,
    Found(Value),
    Missing,
}

/// Validate `name` against the query grammar and persist it.
pub fn add_value<S: TagStore + ?Sized>(store: &S, name: &str) -> Result<Value> {
    validate_name(name, &ReservedVocabulary::query_grammar()).map_err(|reason| {
        TagshelfError::InvalidValueName {
            name: name.to_string(),
            reason,
        }
    })?;

    let value = store.insert_value(name)?;
    debug!(value = %value.name, id = %value.id, "added value");
    Ok(value)
}

/// The empty name never reaches the store.
pub fn value_by_name<S: TagStore + ?Sized>(store: &S, name: &str) -> Result<ValueLookup> {
    if name.is_empty() {
        return Ok(ValueLookup::Unvalued);
    }

    Ok(match store.value_by_name(name)? {
        Some(value) => ValueLookup::Found(value),
        None => ValueLookup::Missing,
    })
}

/// Remove every tagging that uses the value, then the value itself.
pub fn delete_value<S: TagStore + ?Sized>(store: &S, id: ValueId) -> Result<()> {
    for tagging in store.taggings_by_value(id)? {
        store.delete_tagging(&tagging)?;
    }

    store.delete_value(id)
}

/// Delete the value when no tagging or implication references it. Returns
/// whether it went.
pub fn delete_value_if_unused<S: TagStore + ?Sized>(
    store: &S,
    id: Option<ValueId>,
) -> Result<bool> {
    let Some(id) = id else {
        return Ok(false);
    };

    if store.tagging_count_by_value(id)? != 0 || store.implication_count_by_value(id)? != 0 {
        return Ok(false);
    }

    store.delete_value(id)?;
    Ok(true)
}

/// Sweep the candidates, deleting those with no taggings.
pub fn delete_unused_values<S: TagStore + ?Sized>(store: &S, ids: &[ValueId]) -> Result<usize> {
    if ids.is_empty() {
        return Ok(0);
    }

    let deleted = store.delete_unused_values(ids)?;
    if deleted > 0 {
        debug!(deleted, candidates = ids.len(), "swept unused values");
    }
    Ok(deleted)
}

pub fn list_values<S: TagStore + ?Sized>(store: &S) -> Result<Vec<Value>> {
    store.values()
}

/// Result of deleting values by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteValuesReport {
    pub deleted: Vec<String>,
    pub missing: Vec<String>,
}

impl DeleteValuesReport {
    pub fn had_errors(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Delete each named value with its taggings; unknown names are warned about
/// and skipped.
pub fn delete_values_named<S: TagStore + ?Sized>(
    store: &S,
    names: &[String],
) -> Result<DeleteValuesReport> {
    let mut report = DeleteValuesReport::default();

    for name in names {
        match store.value_by_name(name)? {
            Some(value) => {
                delete_value(store, value.id)?;
                report.deleted.push(value.name);
            }
            None => {
                warn!("no such value '{}'", name);
                report.missing.push(name.clone());
            }
        }
    }

    Ok(report)
}
