//! SQLite implementation of the persistence gateway

use super::TagStore;
use crate::domain::{File, FileId, Implication, Tag, TagId, TagUsage, Tagging, Value, ValueId};
use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS tag (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS value (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS file (
    id INTEGER PRIMARY KEY,
    path TEXT NOT NULL UNIQUE,
    is_dir INTEGER NOT NULL DEFAULT 0
);

-- value_id 0 is a tag without a value and has no row in `value`.
CREATE TABLE IF NOT EXISTS file_tag (
    file_id INTEGER NOT NULL REFERENCES file(id),
    tag_id INTEGER NOT NULL REFERENCES tag(id),
    value_id INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (file_id, tag_id, value_id)
);

CREATE INDEX IF NOT EXISTS idx_file_tag_tag_id ON file_tag(tag_id);
CREATE INDEX IF NOT EXISTS idx_file_tag_value_id ON file_tag(value_id);

CREATE TABLE IF NOT EXISTS implication (
    tag_id INTEGER NOT NULL REFERENCES tag(id),
    value_id INTEGER NOT NULL DEFAULT 0,
    implied_tag_id INTEGER NOT NULL REFERENCES tag(id),
    implied_value_id INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (tag_id, value_id, implied_tag_id, implied_value_id)
);
";

/// An open tagshelf database.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Opens or creates the database at `path`, creating parent directories
    /// and the schema as needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "opening database");
        let conn = Connection::open(path)?;
        Self::prepare(conn, Some(path.to_path_buf()))
    }

    /// In-memory database with the full schema, for tests and scratch use.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn, None)
    }

    fn prepare(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Database { conn, path })
    }

    /// Location on disk, `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Begins the transaction an invocation runs in. It rolls back on drop
    /// unless committed.
    pub fn begin(&mut self) -> Result<SqliteTransaction<'_>> {
        Ok(SqliteTransaction {
            tx: self.conn.transaction()?,
        })
    }
}

/// A transaction against a [`Database`]; implements [`TagStore`].
pub struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl SqliteTransaction<'_> {
    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }

    fn count(&self, sql: &str) -> Result<u64> {
        let count: i64 = self.tx.query_row(sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

fn value_column(id: Option<ValueId>) -> i64 {
    id.map_or(0, |id| id.0)
}

fn value_from_column(raw: i64) -> Option<ValueId> {
    (raw != 0).then_some(ValueId(raw))
}

fn path_column(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Prefix that every descendant of `dir` starts with.
fn directory_prefix(dir: &Path) -> String {
    let mut prefix = path_column(dir);
    if !prefix.ends_with('/') {
        prefix.push('/');
    }
    prefix
}

fn file_from_row(row: &Row<'_>) -> rusqlite::Result<File> {
    Ok(File {
        id: FileId(row.get(0)?),
        path: PathBuf::from(row.get::<_, String>(1)?),
        is_dir: row.get(2)?,
    })
}

fn value_from_row(row: &Row<'_>) -> rusqlite::Result<Value> {
    Ok(Value {
        id: ValueId(row.get(0)?),
        name: row.get(1)?,
    })
}

fn tagging_from_row(row: &Row<'_>) -> rusqlite::Result<Tagging> {
    Ok(Tagging {
        file_id: FileId(row.get(0)?),
        tag_id: TagId(row.get(1)?),
        value_id: value_from_column(row.get(2)?),
    })
}

impl TagStore for SqliteTransaction<'_> {
    fn file_by_path(&self, path: &Path) -> Result<Option<File>> {
        let file = self
            .tx
            .query_row(
                "SELECT id, path, is_dir FROM file WHERE path = ?1",
                params![path_column(path)],
                file_from_row,
            )
            .optional()?;
        Ok(file)
    }

    fn files_by_directory(&self, dir: &Path) -> Result<Vec<File>> {
        let prefix = directory_prefix(dir);
        let mut stmt = self.tx.prepare(
            "SELECT id, path, is_dir FROM file
             WHERE substr(path, 1, ?2) = ?1 AND length(path) > ?2
             ORDER BY path",
        )?;
        let files = stmt
            .query_map(
                params![prefix, prefix.chars().count() as i64],
                file_from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(files)
    }

    fn insert_file(&self, path: &Path, is_dir: bool) -> Result<File> {
        self.tx.execute(
            "INSERT INTO file (path, is_dir) VALUES (?1, ?2)",
            params![path_column(path), is_dir],
        )?;
        Ok(File {
            id: FileId(self.tx.last_insert_rowid()),
            path: path.to_path_buf(),
            is_dir,
        })
    }

    fn file_count(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM file")
    }

    fn tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let tag = self
            .tx
            .query_row(
                "SELECT id, name FROM tag WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Tag {
                        id: TagId(row.get(0)?),
                        name: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(tag)
    }

    fn insert_tag(&self, name: &str) -> Result<Tag> {
        self.tx
            .execute("INSERT INTO tag (name) VALUES (?1)", params![name])?;
        Ok(Tag {
            id: TagId(self.tx.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    fn tag_count(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM tag")
    }

    fn tag_usage(&self) -> Result<Vec<TagUsage>> {
        let mut stmt = self.tx.prepare(
            "SELECT t.name, COUNT(DISTINCT ft.file_id)
             FROM tag t
             LEFT JOIN file_tag ft ON ft.tag_id = t.id
             GROUP BY t.id
             ORDER BY t.name",
        )?;
        let usage = stmt
            .query_map([], |row| {
                Ok(TagUsage {
                    name: row.get(0)?,
                    file_count: row.get::<_, i64>(1)? as u64,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(usage)
    }

    fn value_by_name(&self, name: &str) -> Result<Option<Value>> {
        let value = self
            .tx
            .query_row(
                "SELECT id, name FROM value WHERE name = ?1",
                params![name],
                value_from_row,
            )
            .optional()?;
        Ok(value)
    }

    fn values(&self) -> Result<Vec<Value>> {
        let mut stmt = self
            .tx
            .prepare("SELECT id, name FROM value ORDER BY name")?;
        let values = stmt
            .query_map([], value_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(values)
    }

    fn insert_value(&self, name: &str) -> Result<Value> {
        self.tx
            .execute("INSERT INTO value (name) VALUES (?1)", params![name])?;
        Ok(Value {
            id: ValueId(self.tx.last_insert_rowid()),
            name: name.to_string(),
        })
    }

    fn delete_value(&self, id: ValueId) -> Result<()> {
        self.tx.execute(
            "DELETE FROM implication WHERE value_id = ?1 OR implied_value_id = ?1",
            params![id.0],
        )?;
        self.tx
            .execute("DELETE FROM value WHERE id = ?1", params![id.0])?;
        Ok(())
    }

    fn delete_unused_values(&self, ids: &[ValueId]) -> Result<usize> {
        let mut deleted = 0;
        for id in ids {
            // Referenced by a tagging or by an implication rule.
            let removed = self.tx.execute(
                "DELETE FROM value
                 WHERE id = ?1
                   AND NOT EXISTS (SELECT 1 FROM file_tag WHERE value_id = ?1)
                   AND NOT EXISTS (
                       SELECT 1 FROM implication
                       WHERE value_id = ?1 OR implied_value_id = ?1
                   )",
                params![id.0],
            )?;
            if removed > 0 {
                debug!(value_id = id.0, "deleted unused value");
                deleted += removed;
            }
        }
        Ok(deleted)
    }

    fn value_count(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM value")
    }

    fn taggings_by_file(&self, file_id: FileId) -> Result<Vec<Tagging>> {
        let mut stmt = self.tx.prepare(
            "SELECT file_id, tag_id, value_id FROM file_tag
             WHERE file_id = ?1
             ORDER BY tag_id, value_id",
        )?;
        let taggings = stmt
            .query_map(params![file_id.0], tagging_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(taggings)
    }

    fn taggings_by_value(&self, value_id: ValueId) -> Result<Vec<Tagging>> {
        let mut stmt = self.tx.prepare(
            "SELECT file_id, tag_id, value_id FROM file_tag
             WHERE value_id = ?1
             ORDER BY file_id, tag_id",
        )?;
        let taggings = stmt
            .query_map(params![value_id.0], tagging_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(taggings)
    }

    fn tagging_count_by_value(&self, value_id: ValueId) -> Result<u64> {
        let count: i64 = self.tx.query_row(
            "SELECT COUNT(*) FROM file_tag WHERE value_id = ?1",
            params![value_id.0],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn tagging_count(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) FROM file_tag")
    }

    fn implication_count_by_value(&self, value_id: ValueId) -> Result<u64> {
        let count: i64 = self.tx.query_row(
            "SELECT COUNT(*) FROM implication WHERE value_id = ?1 OR implied_value_id = ?1",
            params![value_id.0],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn tagging_exists(&self, tagging: &Tagging, include_implicit: bool) -> Result<bool> {
        let sql = if include_implicit {
            // UNION discards rows already seen, so implication cycles terminate.
            "WITH RECURSIVE held(tag_id, value_id) AS (
                 SELECT tag_id, value_id FROM file_tag WHERE file_id = ?1
                 UNION
                 SELECT i.implied_tag_id, i.implied_value_id
                 FROM implication i
                 JOIN held h ON h.tag_id = i.tag_id AND h.value_id = i.value_id
             )
             SELECT EXISTS (SELECT 1 FROM held WHERE tag_id = ?2 AND value_id = ?3)"
        } else {
            "SELECT EXISTS (
                 SELECT 1 FROM file_tag
                 WHERE file_id = ?1 AND tag_id = ?2 AND value_id = ?3
             )"
        };
        let exists: bool = self.tx.query_row(
            sql,
            params![
                tagging.file_id.0,
                tagging.tag_id.0,
                value_column(tagging.value_id)
            ],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn insert_tagging(&self, tagging: &Tagging) -> Result<bool> {
        let inserted = self.tx.execute(
            "INSERT OR IGNORE INTO file_tag (file_id, tag_id, value_id) VALUES (?1, ?2, ?3)",
            params![
                tagging.file_id.0,
                tagging.tag_id.0,
                value_column(tagging.value_id)
            ],
        )?;
        Ok(inserted > 0)
    }

    fn delete_tagging(&self, tagging: &Tagging) -> Result<bool> {
        let deleted = self.tx.execute(
            "DELETE FROM file_tag WHERE file_id = ?1 AND tag_id = ?2 AND value_id = ?3",
            params![
                tagging.file_id.0,
                tagging.tag_id.0,
                value_column(tagging.value_id)
            ],
        )?;
        Ok(deleted > 0)
    }

    fn delete_taggings_by_file(&self, file_id: FileId) -> Result<usize> {
        let deleted = self
            .tx
            .execute("DELETE FROM file_tag WHERE file_id = ?1", params![file_id.0])?;
        Ok(deleted)
    }

    fn insert_implication(&self, implication: &Implication) -> Result<bool> {
        let inserted = self.tx.execute(
            "INSERT OR IGNORE INTO implication (tag_id, value_id, implied_tag_id, implied_value_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                implication.tag_id.0,
                value_column(implication.value_id),
                implication.implied_tag_id.0,
                value_column(implication.implied_value_id)
            ],
        )?;
        Ok(inserted > 0)
    }
}
