//! Attendance pass-through service.

use crate::live::LiveQuery;
use crate::model::attendance::{AttendanceId, AttendanceMark, AttendanceRecord, AttendanceStatus};
use crate::model::class::ClassId;
use crate::model::student::StudentId;
use crate::repo::attendance_repo::AttendanceRepository;
use crate::repo::RepoResult;

/// Forwards attendance operations to an [`AttendanceRepository`].
pub struct AttendanceService<R: AttendanceRepository> {
    repo: R,
}

impl<R: AttendanceRepository> AttendanceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn upsert_attendance(&self, mark: &AttendanceMark) -> RepoResult<AttendanceId> {
        self.repo.upsert_attendance(mark)
    }

    pub fn get_attendance(
        &self,
        student_id: StudentId,
        date: &str,
    ) -> RepoResult<Option<AttendanceRecord>> {
        self.repo.get_attendance(student_id, date)
    }

    pub fn watch_attendance_by_date_and_class(
        &self,
        date: &str,
        class_id: ClassId,
    ) -> LiveQuery<Vec<AttendanceRecord>> {
        self.repo.watch_attendance_by_date_and_class(date, class_id)
    }

    pub fn list_attendance_by_date_and_class(
        &self,
        date: &str,
        class_id: ClassId,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        self.repo.list_attendance_by_date_and_class(date, class_id)
    }

    pub fn watch_attendance_by_student(
        &self,
        student_id: StudentId,
    ) -> LiveQuery<Vec<AttendanceRecord>> {
        self.repo.watch_attendance_by_student(student_id)
    }

    pub fn list_attendance_in_range(
        &self,
        student_id: StudentId,
        start_date: &str,
        end_date: &str,
    ) -> RepoResult<Vec<AttendanceRecord>> {
        self.repo
            .list_attendance_in_range(student_id, start_date, end_date)
    }

    pub fn count_attendance_by_status(
        &self,
        student_id: StudentId,
        status: AttendanceStatus,
    ) -> RepoResult<u32> {
        self.repo.count_attendance_by_status(student_id, status)
    }
}
