//! Storage access layer: repository contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define CRUD and query contracts per entity.
//! - Keep SQL details inside the core persistence boundary.
//! - Publish table invalidations for every mutation through [`Store`].
//!
//! # Invariants
//! - Write paths validate their payload before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Not-found is `None`, an empty list or `false`; it is never an error.
//! - Storage failures propagate unchanged; nothing here retries.
//!
//! [`Store`]: crate::db::Store

use crate::db::DbError;
use crate::model::class::ClassId;
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod attendance_repo;
pub mod class_repo;
pub mod student_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by all entity repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    /// Persisted row cannot be mapped back to the domain model.
    InvalidData(String),
    /// Unique index on `(class_id, student_id_number)` rejected a write.
    DuplicateStudentIdNumber {
        class_id: ClassId,
        external_id_number: String,
    },
    /// Every `Store` handle was dropped.
    StoreClosed,
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::DuplicateStudentIdNumber {
                class_id,
                external_id_number,
            } => write!(
                f,
                "student id number `{external_id_number}` already exists in class {class_id}"
            ),
            Self::StoreClosed => write!(f, "attendance store has been closed"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "store requires table `{table}`"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn collect_rows<T>(
    mut rows: rusqlite::Rows<'_>,
    parse: impl Fn(&rusqlite::Row<'_>) -> RepoResult<T>,
) -> RepoResult<Vec<T>> {
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(parse(row)?);
    }
    Ok(items)
}
