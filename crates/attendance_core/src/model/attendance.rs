//! Daily attendance marks.
//!
//! # Invariants
//! - At most one record exists per `(student_id, date)`.
//! - `status` is persisted as the literal `Present`, `Absent` or `Late`.

use crate::model::student::StudentId;
use crate::model::validation::{validate_iso_date, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-generated attendance identifier.
pub type AttendanceId = i64;

/// Attendance outcome for one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Present,
    Absent,
    /// Arrived late. Counted as attended in percentages.
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    /// Storage literal for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
            Self::Late => "Late",
        }
    }

    /// Parses a storage literal. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Present" => Some(Self::Present),
            "Absent" => Some(Self::Absent),
            "Late" => Some(Self::Late),
            _ => None,
        }
    }

    /// Whether this status counts towards the attendance percentage.
    pub fn counts_as_attended(self) -> bool {
        matches!(self, Self::Present | Self::Late)
    }
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted attendance row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub student_id: StudentId,
    /// ISO `yyyy-MM-dd`.
    pub date: String,
    pub status: AttendanceStatus,
}

/// Upsert payload keyed by `(student_id, date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMark {
    pub student_id: StudentId,
    pub date: String,
    pub status: AttendanceStatus,
}

impl AttendanceMark {
    pub fn new(student_id: StudentId, date: impl Into<String>, status: AttendanceStatus) -> Self {
        Self {
            student_id,
            date: date.into(),
            status,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_iso_date(&self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::AttendanceStatus;

    #[test]
    fn storage_literals_match_parse() {
        for status in AttendanceStatus::ALL {
            assert_eq!(AttendanceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AttendanceStatus::parse("present"), None);
        assert_eq!(AttendanceStatus::parse("Excused"), None);
    }

    #[test]
    fn late_counts_as_attended() {
        assert!(AttendanceStatus::Present.counts_as_attended());
        assert!(AttendanceStatus::Late.counts_as_attended());
        assert!(!AttendanceStatus::Absent.counts_as_attended());
    }

    #[test]
    fn serde_uses_storage_literals() {
        let json = serde_json::to_string(&AttendanceStatus::Late).unwrap();
        assert_eq!(json, "\"Late\"");
    }
}
