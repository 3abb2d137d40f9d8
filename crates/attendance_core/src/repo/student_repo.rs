//! Student repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Student lists are ordered by `student_name ASC, id ASC`.
//! - `(class_id, student_id_number)` is unique; a violating write surfaces as
//!   `RepoError::DuplicateStudentIdNumber`.
//! - Deleting a student cascades to its attendance records.

use crate::db::Store;
use crate::live::{LiveQuery, Table};
use crate::model::class::ClassId;
use crate::model::student::{NewStudent, StudentId, StudentRecord};
use crate::repo::{collect_rows, RepoError, RepoResult};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};

const STUDENT_SELECT_SQL: &str =
    "SELECT id, student_name, student_id_number, class_id FROM students";

const STUDENT_TABLES: &[Table] = &[Table::Students];
const STUDENT_CASCADE_TABLES: &[Table] = &[Table::Students, Table::Attendance];

/// Repository interface for student operations.
pub trait StudentRepository {
    /// Inserts one student and returns its generated id.
    fn insert_student(&self, student: &NewStudent) -> RepoResult<StudentId>;
    /// Replaces every field of an existing student. `false` when missing.
    fn update_student(&self, student: &StudentRecord) -> RepoResult<bool>;
    /// Deletes a student with its attendance. `false` when missing.
    fn delete_student(&self, id: StudentId) -> RepoResult<bool>;
    /// Live list of one class's students ordered by name.
    fn watch_students_by_class(&self, class_id: ClassId) -> LiveQuery<Vec<StudentRecord>>;
    /// One-shot list of one class's students ordered by name.
    fn list_students_by_class(&self, class_id: ClassId) -> RepoResult<Vec<StudentRecord>>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<StudentRecord>>;
    /// Looks up a student by school id number within one class.
    fn find_student_by_id_number(
        &self,
        external_id_number: &str,
        class_id: ClassId,
    ) -> RepoResult<Option<StudentRecord>>;
}

/// SQLite-backed student repository.
#[derive(Clone)]
pub struct SqliteStudentRepository {
    store: Store,
}

impl SqliteStudentRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl StudentRepository for SqliteStudentRepository {
    fn insert_student(&self, student: &NewStudent) -> RepoResult<StudentId> {
        student.validate()?;

        self.store.write(STUDENT_TABLES, |conn| {
            conn.execute(
                "INSERT INTO students (student_name, student_id_number, class_id)
                 VALUES (?1, ?2, ?3);",
                params![
                    student.name.as_str(),
                    student.external_id_number.as_str(),
                    student.class_id,
                ],
            )
            .map_err(|err| {
                map_unique_violation(err, student.class_id, &student.external_id_number)
            })?;
            Ok(conn.last_insert_rowid())
        })
    }

    fn update_student(&self, student: &StudentRecord) -> RepoResult<bool> {
        student.validate()?;

        self.store.write(STUDENT_TABLES, |conn| {
            let changed = conn
                .execute(
                    "UPDATE students
                     SET student_name = ?1, student_id_number = ?2, class_id = ?3
                     WHERE id = ?4;",
                    params![
                        student.name.as_str(),
                        student.external_id_number.as_str(),
                        student.class_id,
                        student.id,
                    ],
                )
                .map_err(|err| {
                    map_unique_violation(err, student.class_id, &student.external_id_number)
                })?;
            Ok(changed > 0)
        })
    }

    fn delete_student(&self, id: StudentId) -> RepoResult<bool> {
        self.store.write(STUDENT_CASCADE_TABLES, |conn| {
            let changed = conn.execute("DELETE FROM students WHERE id = ?1;", [id])?;
            Ok(changed > 0)
        })
    }

    fn watch_students_by_class(&self, class_id: ClassId) -> LiveQuery<Vec<StudentRecord>> {
        self.store.watch(STUDENT_TABLES, move |conn| {
            load_students_by_class(conn, class_id)
        })
    }

    fn list_students_by_class(&self, class_id: ClassId) -> RepoResult<Vec<StudentRecord>> {
        self.store
            .read(|conn| load_students_by_class(conn, class_id))
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<StudentRecord>> {
        self.store.read(|conn| {
            let student = conn
                .query_row(
                    &format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"),
                    [id],
                    parse_student_row,
                )
                .optional()?;
            Ok(student)
        })
    }

    fn find_student_by_id_number(
        &self,
        external_id_number: &str,
        class_id: ClassId,
    ) -> RepoResult<Option<StudentRecord>> {
        self.store.read(|conn| {
            let student = conn
                .query_row(
                    &format!(
                        "{STUDENT_SELECT_SQL} WHERE student_id_number = ?1 AND class_id = ?2;"
                    ),
                    params![external_id_number, class_id],
                    parse_student_row,
                )
                .optional()?;
            Ok(student)
        })
    }
}

fn load_students_by_class(conn: &Connection, class_id: ClassId) -> RepoResult<Vec<StudentRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{STUDENT_SELECT_SQL} WHERE class_id = ?1 ORDER BY student_name ASC, id ASC;"
    ))?;
    let rows = stmt.query([class_id])?;
    collect_rows(rows, |row| Ok(parse_student_row(row)?))
}

fn parse_student_row(row: &Row<'_>) -> rusqlite::Result<StudentRecord> {
    Ok(StudentRecord {
        id: row.get("id")?,
        name: row.get("student_name")?,
        external_id_number: row.get("student_id_number")?,
        class_id: row.get("class_id")?,
    })
}

fn map_unique_violation(
    err: rusqlite::Error,
    class_id: ClassId,
    external_id_number: &str,
) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::DuplicateStudentIdNumber {
                class_id,
                external_id_number: external_id_number.to_string(),
            }
        }
        _ => err.into(),
    }
}
