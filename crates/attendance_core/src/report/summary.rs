//! Class-level and school-wide attendance summaries.

use crate::model::class::ClassRecord;
use crate::report::stats::{mean, student_stats, AttendanceBand};
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::class_repo::ClassRepository;
use crate::repo::student_repo::StudentRepository;
use crate::repo::RepoResult;
use crate::service::attendance_service::AttendanceService;
use crate::service::class_service::ClassService;
use crate::service::student_service::StudentService;
use serde::{Deserialize, Serialize};

/// All-time totals for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAttendanceSummary {
    pub class: ClassRecord,
    pub total_students: u32,
    pub total_present: u32,
    pub total_absent: u32,
    pub total_late: u32,
    /// Mean of the students' own percentages, so every student weighs the
    /// same regardless of how many days were marked.
    pub average_attendance: f64,
}

impl ClassAttendanceSummary {
    pub fn band(&self) -> AttendanceBand {
        AttendanceBand::from_percentage(self.average_attendance)
    }
}

/// Summary across every class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummary {
    pub total_classes: u32,
    pub total_students: u32,
    /// Mean of class averages.
    pub average_attendance: f64,
    /// Ordered like the class list (by name).
    pub classes: Vec<ClassAttendanceSummary>,
}

/// Aggregates all-time statistics of every student in `class`.
pub fn class_summary<S, A>(
    students: &StudentService<S>,
    attendance: &AttendanceService<A>,
    class: ClassRecord,
) -> RepoResult<ClassAttendanceSummary>
where
    S: StudentRepository,
    A: AttendanceRepository,
{
    let roster = students.list_students_by_class(class.id)?;
    let mut summary = ClassAttendanceSummary {
        class,
        total_students: roster.len() as u32,
        total_present: 0,
        total_absent: 0,
        total_late: 0,
        average_attendance: 0.0,
    };

    let mut percentages = Vec::with_capacity(roster.len());
    for student in &roster {
        let stats = student_stats(attendance, student.id)?;
        summary.total_present += stats.present;
        summary.total_absent += stats.absent;
        summary.total_late += stats.late;
        percentages.push(stats.percentage);
    }
    summary.average_attendance = mean(&percentages);

    Ok(summary)
}

/// Builds a [`ClassAttendanceSummary`] for every class.
pub fn overall_summary<C, S, A>(
    classes: &ClassService<C>,
    students: &StudentService<S>,
    attendance: &AttendanceService<A>,
) -> RepoResult<OverallSummary>
where
    C: ClassRepository,
    S: StudentRepository,
    A: AttendanceRepository,
{
    let summaries = classes
        .list_classes()?
        .into_iter()
        .map(|class| class_summary(students, attendance, class))
        .collect::<RepoResult<Vec<_>>>()?;

    let averages: Vec<f64> = summaries
        .iter()
        .map(|summary| summary.average_attendance)
        .collect();

    Ok(OverallSummary {
        total_classes: summaries.len() as u32,
        total_students: summaries.iter().map(|summary| summary.total_students).sum(),
        average_attendance: mean(&averages),
        classes: summaries,
    })
}
