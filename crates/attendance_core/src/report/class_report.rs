//! Per-student attendance report for one class.
//!
//! # Invariants
//! - Rows follow the student list order (name ascending), one per student.
//! - With a date range every row uses range statistics; without one every
//!   row uses all-time statistics.

use crate::model::class::ClassRecord;
use crate::model::student::StudentRecord;
use crate::report::stats::{student_stats, student_stats_in_range, AttendanceStats};
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoResult;
use crate::service::attendance_service::AttendanceService;
use crate::service::student_service::StudentService;
use serde::{Deserialize, Serialize};

/// Inclusive `[start_date, end_date]` filter for a class report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange<'a> {
    pub start_date: &'a str,
    pub end_date: &'a str,
}

impl<'a> DateRange<'a> {
    pub fn new(start_date: &'a str, end_date: &'a str) -> Self {
        Self {
            start_date,
            end_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReportRow {
    pub student: StudentRecord,
    pub stats: AttendanceStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub class: ClassRecord,
    /// `(start_date, end_date)` when the report is range-filtered.
    pub range: Option<(String, String)>,
    pub rows: Vec<ClassReportRow>,
}

/// Builds one row of statistics per student of `class`.
///
/// # Errors
/// - `Validation` when a range bound is not an ISO date.
pub fn class_report<S, A>(
    students: &StudentService<S>,
    attendance: &AttendanceService<A>,
    class: ClassRecord,
    range: Option<DateRange<'_>>,
) -> RepoResult<ClassReport>
where
    S: StudentRepository,
    A: AttendanceRepository,
{
    let rows = students
        .list_students_by_class(class.id)?
        .into_iter()
        .map(|student| -> RepoResult<ClassReportRow> {
            let stats = match range {
                Some(range) => student_stats_in_range(
                    attendance,
                    student.id,
                    range.start_date,
                    range.end_date,
                )?,
                None => student_stats(attendance, student.id)?,
            };
            Ok(ClassReportRow { student, stats })
        })
        .collect::<RepoResult<Vec<_>>>()?;

    Ok(ClassReport {
        class,
        range: range.map(|range| (range.start_date.to_string(), range.end_date.to_string())),
        rows,
    })
}
