//! Shared setup for unit tests that need a populated store

use super::{Database, SqliteTransaction, TagStore};
use crate::domain::{File, FileId, Implication, TagId, Tagging, ValueId};
use std::path::Path;

pub(crate) struct Fixture {
    db: Database,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Fixture {
            db: Database::open_in_memory().unwrap(),
        }
    }

    pub(crate) fn tx(&mut self) -> SqliteTransaction<'_> {
        self.db.begin().unwrap()
    }

    pub(crate) fn file(tx: &SqliteTransaction<'_>, path: &str) -> File {
        tx.insert_file(Path::new(path), false).unwrap()
    }

    pub(crate) fn tag(
        tx: &SqliteTransaction<'_>,
        file_id: FileId,
        tag_id: TagId,
        value_id: Option<ValueId>,
    ) -> Tagging {
        let tagging = Tagging {
            file_id,
            tag_id,
            value_id,
        };
        tx.insert_tagging(&tagging).unwrap();
        tagging
    }

    pub(crate) fn imply(tx: &SqliteTransaction<'_>, tag_id: TagId, implied_tag_id: TagId) {
        Self::imply_valued(tx, tag_id, None, implied_tag_id, None);
    }

    pub(crate) fn imply_valued(
        tx: &SqliteTransaction<'_>,
        tag_id: TagId,
        value_id: Option<ValueId>,
        implied_tag_id: TagId,
        implied_value_id: Option<ValueId>,
    ) {
        tx.insert_implication(&Implication {
            tag_id,
            value_id,
            implied_tag_id,
            implied_value_id,
        })
        .unwrap();
    }
}
