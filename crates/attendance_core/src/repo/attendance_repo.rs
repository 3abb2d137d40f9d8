//! Attendance repository contracts and SQLite implementation.
//!
//! # Invariants
//! - One row per `(student_id, date)`; upsert keeps the row id and replaces
//!   only `status` (last write wins).
//! - Range queries compare ISO date strings, so both bounds are validated
//!   before the query runs.
//! - Rows with an unknown `status` are reported as `InvalidData`.

use crate::db::Store;
use crate::live::{LiveQuery, Table};
use crate::model::attendance::{AttendanceId, AttendanceMark, AttendanceRecord, AttendanceStatus};
use crate::model::class::ClassId;
use crate::model::student::StudentId;
use crate::model::validation::validate_iso_date;
use crate::repo::{collect_rows, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ATTENDANCE_SELECT_SQL: &str = "SELECT id, student_id, date, status FROM attendance";

const ATTENDANCE_TABLES: &[Table] = &[Table::Attendance];
// Moving a student to another class changes which rows a class view sees.
const CLASS_DAY_TABLES: &[Table] = &[Table::Students, Table::Attendance];

/// Repository interface for attendance operations.
pub trait AttendanceRepository {
    /// Inserts a mark or replaces the status of the existing one for the
    /// same student and date. Returns the row id.
    fn upsert_attendance(&self, mark: &AttendanceMark) -> RepoResult<AttendanceId>;
    fn get_attendance(
        &self,
        student_id: StudentId,
        date: &str,
    ) -> RepoResult<Option<AttendanceRecord>>;
    /// Live list of one day's marks for every student of a class.
    fn watch_attendance_by_date_and_class(
        &self,
        date: &str,
        class_id: ClassId,
    ) -> LiveQuery<Vec<AttendanceRecord>>;
    /// One-shot variant of [`Self::watch_attendance_by_date_and_class`].
    fn list_attendance_by_date_and_class(
        &self,
        date: &str,
        class_id: ClassId,
    ) -> RepoResult<Vec<AttendanceRecord>>;
    /// Live history of one student, newest date first.
    fn watch_attendance_by_student(&self, student_id: StudentId)
        -> LiveQuery<Vec<AttendanceRecord>>;
    /// Marks with `start_date <= date <= end_date`, oldest first.
    fn list_attendance_in_range(
        &self,
        student_id: StudentId,
        start_date: &str,
        end_date: &str,
    ) -> RepoResult<Vec<AttendanceRecord>>;
    fn count_attendance_by_status(
        &self,
        student_id: StudentId,
        status: AttendanceStatus,
    ) -> RepoResult<u32>;
}

/// SQLite-backed attendance repository.
#[derive(Clone)]
pub struct SqliteAttendanceRepository {
    store: Store,
}

impl SqliteAttendanceRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl AttendanceRepository for SqliteAttendanceRepository {
    fn upsert_attendance(&self, mark: &AttendanceMark) -> RepoResult<AttendanceId> {
        mark.validate()?;

        self.store.write(ATTENDANCE_TABLES, |conn| {
            let id = conn.query_row(
                "INSERT INTO attendance (student_id, date, status)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (student_id, date) DO UPDATE SET status = excluded.status
                 RETURNING id;",
                params![mark.student_id, mark.date.as_str(), mark.status.as_str()],
                |row| row.get(0),
            )?;
            Ok(id)
        })
    }

    fn get_attendance(
        &self,
        student_id: StudentId,
        date: &str,
    ) -> RepoResult<Option<AttendanceRecord>> {
        self.store.read(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{ATTENDANCE_SELECT_SQL} WHERE student_id = ?1 AND date = ?2;"
            ))?;
            let mut rows = stmt.query(params![student_id, date])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_attendance_row(row)?));
            }

            Ok(None)
        })
    }

    fn watch_attendance_by_date_and_class(
        &self,
        date: &str,
        class_id: ClassId,
    ) -> LiveQuery<Vec<AttendanceRecord>> {
        let date = date.to_string();
        self.store.watch(CLASS_DAY_TABLES, move |conn| {
            load_by_date_and_class(conn, &date, class_id)
        })
    }

    fn list_attendance_by_date_and_class(
        &self,
        date: &str,
        class_id: ClassId,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        self.store
            .read(|conn| load_by_date_and_class(conn, date, class_id))
    }

    fn watch_attendance_by_student(
        &self,
        student_id: StudentId,
    ) -> LiveQuery<Vec<AttendanceRecord>> {
        self.store.watch(ATTENDANCE_TABLES, move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{ATTENDANCE_SELECT_SQL} WHERE student_id = ?1 ORDER BY date DESC;"
            ))?;
            let rows = stmt.query([student_id])?;
            collect_rows(rows, parse_attendance_row)
        })
    }

    fn list_attendance_in_range(
        &self,
        student_id: StudentId,
        start_date: &str,
        end_date: &str,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        validate_iso_date(start_date)?;
        validate_iso_date(end_date)?;

        self.store.read(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{ATTENDANCE_SELECT_SQL}
                 WHERE student_id = ?1
                   AND date BETWEEN ?2 AND ?3
                 ORDER BY date ASC;"
            ))?;
            let rows = stmt.query(params![student_id, start_date, end_date])?;
            collect_rows(rows, parse_attendance_row)
        })
    }

    fn count_attendance_by_status(
        &self,
        student_id: StudentId,
        status: AttendanceStatus,
    ) -> RepoResult<u32> {
        self.store.read(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM attendance WHERE student_id = ?1 AND status = ?2;",
                params![student_id, status.as_str()],
                |row| row.get(0),
            )?;
            Ok(count)
        })
    }
}

fn load_by_date_and_class(
    conn: &Connection,
    date: &str,
    class_id: ClassId,
) -> RepoResult<Vec<AttendanceRecord>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.student_id, a.date, a.status
         FROM attendance a
         INNER JOIN students s ON s.id = a.student_id
         WHERE a.date = ?1
           AND s.class_id = ?2
         ORDER BY a.student_id ASC;",
    )?;
    let rows = stmt.query(params![date, class_id])?;
    collect_rows(rows, parse_attendance_row)
}

fn parse_attendance_row(row: &Row<'_>) -> RepoResult<AttendanceRecord> {
    let status_text: String = row.get("status")?;
    let status = AttendanceStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid attendance status `{status_text}` in attendance.status"
        ))
    })?;

    Ok(AttendanceRecord {
        id: row.get("id")?,
        student_id: row.get("student_id")?,
        date: row.get("date")?,
        status,
    })
}
