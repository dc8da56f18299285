//! Single tagging mutations

use crate::domain::{FileId, TagId, Tagging, ValueId};
use crate::error::{Result, TagshelfError};
use crate::infrastructure::TagStore;

/// Remove exactly the explicit `(file, tag, value)` tagging.
///
/// Fails with [`TagshelfError::TaggingNotFound`] when no explicit row
/// matches, whether or not the tagging is held implicitly. The value is not
/// garbage-collected here.
pub fn delete_tagging<S: TagStore + ?Sized>(
    store: &S,
    file_id: FileId,
    tag_id: TagId,
    value_id: Option<ValueId>,
) -> Result<()> {
    let tagging = Tagging {
        file_id,
        tag_id,
        value_id,
    };

    if store.delete_tagging(&tagging)? {
        Ok(())
    } else {
        Err(TagshelfError::TaggingNotFound {
            file_id,
            tag_id,
            value_id,
        })
    }
}

pub fn tagging_exists<S: TagStore + ?Sized>(
    store: &S,
    file_id: FileId,
    tag_id: TagId,
    value_id: Option<ValueId>,
    include_implicit: bool,
) -> Result<bool> {
    store.tagging_exists(
        &Tagging {
            file_id,
            tag_id,
            value_id,
        },
        include_implicit,
    )
}

/// Record an explicit tagging. Returns false if it was already there.
pub fn add_tagging<S: TagStore + ?Sized>(
    store: &S,
    file_id: FileId,
    tag_id: TagId,
    value_id: Option<ValueId>,
) -> Result<bool> {
    store.insert_tagging(&Tagging {
        file_id,
        tag_id,
        value_id,
    })
}
