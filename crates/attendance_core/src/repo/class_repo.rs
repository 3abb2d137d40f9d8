//! Class repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Class lists are ordered by `class_name ASC, id ASC`.
//! - Deleting a class cascades to its students and their attendance, so a
//!   delete invalidates all three tables.

use crate::db::Store;
use crate::live::{LiveQuery, Table};
use crate::model::class::{ClassId, ClassRecord, NewClass};
use crate::repo::{collect_rows, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const CLASS_SELECT_SQL: &str = "SELECT id, class_name, subject_name FROM classes";

const CLASS_TABLES: &[Table] = &[Table::Classes];
const CLASS_CASCADE_TABLES: &[Table] = &[Table::Classes, Table::Students, Table::Attendance];

/// Repository interface for class operations.
pub trait ClassRepository {
    /// Inserts one class and returns its generated id.
    fn insert_class(&self, class: &NewClass) -> RepoResult<ClassId>;
    /// Replaces name and subject of an existing class. `false` when missing.
    fn update_class(&self, class: &ClassRecord) -> RepoResult<bool>;
    /// Deletes a class with its students and attendance. `false` when missing.
    fn delete_class(&self, id: ClassId) -> RepoResult<bool>;
    /// Live list of all classes ordered by name.
    fn watch_classes(&self) -> LiveQuery<Vec<ClassRecord>>;
    /// One-shot list of all classes ordered by name.
    fn list_classes(&self) -> RepoResult<Vec<ClassRecord>>;
    fn get_class(&self, id: ClassId) -> RepoResult<Option<ClassRecord>>;
}

/// SQLite-backed class repository.
#[derive(Clone)]
pub struct SqliteClassRepository {
    store: Store,
}

impl SqliteClassRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl ClassRepository for SqliteClassRepository {
    fn insert_class(&self, class: &NewClass) -> RepoResult<ClassId> {
        class.validate()?;

        self.store.write(CLASS_TABLES, |conn| {
            conn.execute(
                "INSERT INTO classes (class_name, subject_name) VALUES (?1, ?2);",
                params![class.name.as_str(), class.subject.as_str()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn update_class(&self, class: &ClassRecord) -> RepoResult<bool> {
        class.validate()?;

        self.store.write(CLASS_TABLES, |conn| {
            let changed = conn.execute(
                "UPDATE classes
                 SET class_name = ?1, subject_name = ?2
                 WHERE id = ?3;",
                params![class.name.as_str(), class.subject.as_str(), class.id],
            )?;
            Ok(changed > 0)
        })
    }

    fn delete_class(&self, id: ClassId) -> RepoResult<bool> {
        self.store.write(CLASS_CASCADE_TABLES, |conn| {
            let changed = conn.execute("DELETE FROM classes WHERE id = ?1;", [id])?;
            Ok(changed > 0)
        })
    }

    fn watch_classes(&self) -> LiveQuery<Vec<ClassRecord>> {
        self.store.watch(CLASS_TABLES, load_classes)
    }

    fn list_classes(&self) -> RepoResult<Vec<ClassRecord>> {
        self.store.read(load_classes)
    }

    fn get_class(&self, id: ClassId) -> RepoResult<Option<ClassRecord>> {
        self.store.read(|conn| {
            let class = conn
                .query_row(
                    &format!("{CLASS_SELECT_SQL} WHERE id = ?1;"),
                    [id],
                    parse_class_row,
                )
                .optional()?;
            Ok(class)
        })
    }
}

fn load_classes(conn: &Connection) -> RepoResult<Vec<ClassRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{CLASS_SELECT_SQL} ORDER BY class_name ASC, id ASC;"
    ))?;
    let rows = stmt.query([])?;
    collect_rows(rows, |row| Ok(parse_class_row(row)?))
}

fn parse_class_row(row: &Row<'_>) -> rusqlite::Result<ClassRecord> {
    Ok(ClassRecord {
        id: row.get("id")?,
        name: row.get("class_name")?,
        subject: row.get("subject_name")?,
    })
}
