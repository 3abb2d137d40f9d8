//! Per-student attendance statistics.

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::student::StudentId;
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::RepoResult;
use crate::service::attendance_service::AttendanceService;
use serde::{Deserialize, Serialize};

const EXCELLENT_THRESHOLD: f64 = 90.0;
const GOOD_THRESHOLD: f64 = 75.0;
const WARNING_THRESHOLD: f64 = 50.0;

/// Status counts and attendance percentage for one student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStats {
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    /// `present + absent + late`.
    pub total: u32,
    /// `(present + late) / total * 100`, or `0.0` when `total == 0`.
    pub percentage: f64,
}

impl AttendanceStats {
    pub fn from_counts(present: u32, absent: u32, late: u32) -> Self {
        let total = present + absent + late;
        let attended = [
            (AttendanceStatus::Present, present),
            (AttendanceStatus::Absent, absent),
            (AttendanceStatus::Late, late),
        ]
        .into_iter()
        .filter(|(status, _)| status.counts_as_attended())
        .map(|(_, count)| count)
        .sum();
        Self {
            present,
            absent,
            late,
            total,
            percentage: percentage(attended, total),
        }
    }

    /// Counts a set of records. Each record contributes to exactly one bucket.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let (mut present, mut absent, mut late) = (0, 0, 0);
        for record in records {
            match record.status {
                AttendanceStatus::Present => present += 1,
                AttendanceStatus::Absent => absent += 1,
                AttendanceStatus::Late => late += 1,
            }
        }
        Self::from_counts(present, absent, late)
    }

    pub fn band(&self) -> AttendanceBand {
        AttendanceBand::from_percentage(self.percentage)
    }
}

/// Coarse grading of an attendance percentage for colour-coded display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceBand {
    /// 90% and above.
    Excellent,
    /// 75% up to 90%.
    Good,
    /// 50% up to 75%.
    Warning,
    Poor,
}

impl AttendanceBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= EXCELLENT_THRESHOLD {
            Self::Excellent
        } else if percentage >= GOOD_THRESHOLD {
            Self::Good
        } else if percentage >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Poor
        }
    }
}

/// All-time statistics for one student.
pub fn student_stats<R: AttendanceRepository>(
    attendance: &AttendanceService<R>,
    student_id: StudentId,
) -> RepoResult<AttendanceStats> {
    let present = attendance.count_attendance_by_status(student_id, AttendanceStatus::Present)?;
    let absent = attendance.count_attendance_by_status(student_id, AttendanceStatus::Absent)?;
    let late = attendance.count_attendance_by_status(student_id, AttendanceStatus::Late)?;
    Ok(AttendanceStats::from_counts(present, absent, late))
}

/// Statistics over marks dated within `[start_date, end_date]`.
///
/// An inverted range matches nothing and yields zero stats.
pub fn student_stats_in_range<R: AttendanceRepository>(
    attendance: &AttendanceService<R>,
    student_id: StudentId,
    start_date: &str,
    end_date: &str,
) -> RepoResult<AttendanceStats> {
    let records = attendance.list_attendance_in_range(student_id, start_date, end_date)?;
    Ok(AttendanceStats::from_records(&records))
}

pub(crate) fn percentage(attended: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(attended) * 100.0 / f64::from(total)
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
