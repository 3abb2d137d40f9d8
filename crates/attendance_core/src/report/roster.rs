//! Daily roster view for attendance marking.
//!
//! # Invariants
//! - Every enrolled student appears exactly once before filtering.
//! - Roster order follows the student list (name ascending).
//! - Search is case-insensitive over name and id number; blank matches all.

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::class::ClassId;
use crate::model::student::{StudentId, StudentRecord};
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoResult;
use crate::service::attendance_service::AttendanceService;
use crate::service::student_service::StudentService;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Status filter applied to roster entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterFilter {
    #[default]
    All,
    Present,
    Absent,
    Late,
    /// Students without a mark for the day.
    Unmarked,
}

impl RosterFilter {
    pub fn matches(self, status: Option<AttendanceStatus>) -> bool {
        match self {
            Self::All => true,
            Self::Present => status == Some(AttendanceStatus::Present),
            Self::Absent => status == Some(AttendanceStatus::Absent),
            Self::Late => status == Some(AttendanceStatus::Late),
            Self::Unmarked => status.is_none(),
        }
    }
}

/// One student and the day's mark, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub student: StudentRecord,
    pub status: Option<AttendanceStatus>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRoster {
    pub class_id: ClassId,
    pub date: String,
    /// Entries left after filter and search.
    pub entries: Vec<RosterEntry>,
    /// Enrolled students before filter and search.
    pub total_students: usize,
}

/// Loads students and the day's marks for `class_id`, then applies
/// `filter` and `search`.
pub fn daily_roster<S, A>(
    students: &StudentService<S>,
    attendance: &AttendanceService<A>,
    class_id: ClassId,
    date: &str,
    filter: RosterFilter,
    search: &str,
) -> RepoResult<DailyRoster>
where
    S: StudentRepository,
    A: AttendanceRepository,
{
    let enrolled = students.list_students_by_class(class_id)?;
    let marks = attendance.list_attendance_by_date_and_class(date, class_id)?;
    let total_students = enrolled.len();

    Ok(DailyRoster {
        class_id,
        date: date.to_string(),
        entries: build_entries(enrolled, &marks, filter, search),
        total_students,
    })
}

fn build_entries(
    enrolled: Vec<StudentRecord>,
    marks: &[AttendanceRecord],
    filter: RosterFilter,
    search: &str,
) -> Vec<RosterEntry> {
    let by_student: HashMap<StudentId, AttendanceStatus> = marks
        .iter()
        .map(|mark| (mark.student_id, mark.status))
        .collect();
    let needle = search.trim().to_lowercase();

    enrolled
        .into_iter()
        .map(|student| {
            let status = by_student.get(&student.id).copied();
            RosterEntry { student, status }
        })
        .filter(|entry| filter.matches(entry.status) && matches_search(&entry.student, &needle))
        .collect()
}

fn matches_search(student: &StudentRecord, needle: &str) -> bool {
    needle.is_empty()
        || student.name.to_lowercase().contains(needle)
        || student.external_id_number.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::{build_entries, RosterFilter};
    use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
    use crate::model::student::StudentRecord;

    fn student(id: i64, name: &str, number: &str) -> StudentRecord {
        StudentRecord {
            id,
            name: name.to_string(),
            external_id_number: number.to_string(),
            class_id: 1,
        }
    }

    fn mark(student_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: student_id * 10,
            student_id,
            date: "2024-05-06".to_string(),
            status,
        }
    }

    fn enrolled() -> Vec<StudentRecord> {
        vec![
            student(1, "Alice Reyes", "2021-001"),
            student(2, "Bob Cruz", "2021-002"),
            student(3, "Carol Santos", "2022-003"),
        ]
    }

    #[test]
    fn unmarked_filter_keeps_students_without_marks() {
        let marks = vec![mark(1, AttendanceStatus::Present)];
        let entries = build_entries(enrolled(), &marks, RosterFilter::Unmarked, "");
        let ids: Vec<i64> = entries.iter().map(|entry| entry.student.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!(entries.iter().all(|entry| entry.status.is_none()));
    }

    #[test]
    fn status_filter_and_search_combine() {
        let marks = vec![
            mark(1, AttendanceStatus::Late),
            mark(2, AttendanceStatus::Late),
            mark(3, AttendanceStatus::Absent),
        ];
        let entries = build_entries(enrolled(), &marks, RosterFilter::Late, "  BOB ");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].student.name, "Bob Cruz");
        assert_eq!(entries[0].status, Some(AttendanceStatus::Late));
    }

    #[test]
    fn search_matches_id_number() {
        let entries = build_entries(enrolled(), &[], RosterFilter::All, "2022");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].student.id, 3);
    }
}
