//! Composition root and caller-facing use cases.
//!
//! # Responsibility
//! - Construct the single shared [`Store`] and the services built on it.
//! - Host the use cases the presentation layer triggers (add class, enroll
//!   student, mark attendance, reports).
//!
//! # Invariants
//! - One `AttendanceApp` owns one `Store`; there is no global handle.
//! - Enrollment checks for a duplicate id number before inserting. The
//!   storage unique index still rejects a concurrent duplicate that slips
//!   past the check.

use crate::config::CoreConfig;
use crate::db::Store;
use crate::logging::{init_logging, LoggingError};
use crate::model::attendance::{AttendanceId, AttendanceMark, AttendanceStatus};
use crate::model::class::{ClassId, NewClass};
use crate::model::student::{NewStudent, StudentId};
use crate::model::validation::{iso_today, ValidationError};
use crate::report::class_report::{class_report, ClassReport, DateRange};
use crate::report::roster::{daily_roster, DailyRoster, RosterFilter};
use crate::report::stats::{student_stats, student_stats_in_range, AttendanceStats};
use crate::report::summary::{class_summary, overall_summary, ClassAttendanceSummary, OverallSummary};
use crate::repo::attendance_repo::SqliteAttendanceRepository;
use crate::repo::class_repo::SqliteClassRepository;
use crate::repo::student_repo::SqliteStudentRepository;
use crate::repo::{RepoError, RepoResult};
use crate::service::attendance_service::AttendanceService;
use crate::service::class_service::ClassService;
use crate::service::student_service::StudentService;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AppResult<T> = Result<T, AppError>;

/// Use-case level error surfaced to the presentation layer.
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    DuplicateStudentIdNumber {
        class_id: ClassId,
        external_id_number: String,
    },
    Logging(LoggingError),
    Repo(RepoError),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateStudentIdNumber { .. } => {
                write!(f, "student id already exists in this class")
            }
            Self::Logging(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::DuplicateStudentIdNumber { .. } => None,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<LoggingError> for AppError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::DuplicateStudentIdNumber {
                class_id,
                external_id_number,
            } => Self::DuplicateStudentIdNumber {
                class_id,
                external_id_number,
            },
            other => Self::Repo(other),
        }
    }
}

/// Application-wide handle: one store, three services.
pub struct AttendanceApp {
    store: Store,
    classes: ClassService<SqliteClassRepository>,
    students: StudentService<SqliteStudentRepository>,
    attendance: AttendanceService<SqliteAttendanceRepository>,
}

impl AttendanceApp {
    /// Starts logging (when `log_dir` is set) and opens the database.
    pub fn open(config: &CoreConfig) -> AppResult<Self> {
        if let Some(log_dir) = config.log_dir.as_deref() {
            init_logging(&config.log_level, log_dir)?;
        }
        let store = Store::open(&config.db_path)?;
        info!(
            "event=app_open module=app status=ok db_path={}",
            config.db_path.display()
        );
        Ok(Self::from_store(store))
    }

    /// Opens a throwaway in-memory database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::from_store(Store::open_in_memory()?))
    }

    pub fn from_store(store: Store) -> Self {
        Self {
            classes: ClassService::new(SqliteClassRepository::new(store.clone())),
            students: StudentService::new(SqliteStudentRepository::new(store.clone())),
            attendance: AttendanceService::new(SqliteAttendanceRepository::new(store.clone())),
            store,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn classes(&self) -> &ClassService<SqliteClassRepository> {
        &self.classes
    }

    pub fn students(&self) -> &StudentService<SqliteStudentRepository> {
        &self.students
    }

    pub fn attendance(&self) -> &AttendanceService<SqliteAttendanceRepository> {
        &self.attendance
    }

    /// Creates a class from trimmed form input.
    pub fn add_class(&self, name: &str, subject: &str) -> AppResult<ClassId> {
        let class = NewClass::new(name.trim(), subject.trim());
        class.validate()?;
        let id = self.classes.insert_class(&class)?;
        info!("event=class_add module=app status=ok class_id={id}");
        Ok(id)
    }

    /// Whether `external_id_number` is already used inside `class_id`.
    pub fn student_id_exists(&self, external_id_number: &str, class_id: ClassId) -> RepoResult<bool> {
        Ok(self
            .students
            .find_student_by_id_number(external_id_number, class_id)?
            .is_some())
    }

    /// Enrolls a student from trimmed form input.
    ///
    /// # Errors
    /// - `Validation` for blank fields.
    /// - `DuplicateStudentIdNumber` when the id number is taken in the class.
    pub fn add_student(
        &self,
        name: &str,
        external_id_number: &str,
        class_id: ClassId,
    ) -> AppResult<StudentId> {
        let student = NewStudent::new(name.trim(), external_id_number.trim(), class_id);
        student.validate()?;
        if self.student_id_exists(&student.external_id_number, class_id)? {
            return Err(AppError::DuplicateStudentIdNumber {
                class_id,
                external_id_number: student.external_id_number,
            });
        }
        let id = self.students.insert_student(&student)?;
        info!("event=student_add module=app status=ok class_id={class_id} student_id={id}");
        Ok(id)
    }

    /// Records or replaces one student's mark for `date`.
    pub fn mark_attendance(
        &self,
        student_id: StudentId,
        date: &str,
        status: AttendanceStatus,
    ) -> RepoResult<AttendanceId> {
        self.attendance
            .upsert_attendance(&AttendanceMark::new(student_id, date, status))
    }

    pub fn attendance_stats(&self, student_id: StudentId) -> RepoResult<AttendanceStats> {
        student_stats(&self.attendance, student_id)
    }

    pub fn attendance_stats_in_range(
        &self,
        student_id: StudentId,
        start_date: &str,
        end_date: &str,
    ) -> RepoResult<AttendanceStats> {
        student_stats_in_range(&self.attendance, student_id, start_date, end_date)
    }

    /// Summary of one class, or `None` when the class does not exist.
    pub fn class_summary(&self, class_id: ClassId) -> RepoResult<Option<ClassAttendanceSummary>> {
        match self.classes.get_class(class_id)? {
            Some(class) => Ok(Some(class_summary(&self.students, &self.attendance, class)?)),
            None => Ok(None),
        }
    }

    /// Per-student statistics of one class, all-time or within `range`.
    /// `None` when the class does not exist.
    pub fn class_report(
        &self,
        class_id: ClassId,
        range: Option<DateRange<'_>>,
    ) -> RepoResult<Option<ClassReport>> {
        match self.classes.get_class(class_id)? {
            Some(class) => Ok(Some(class_report(&self.students, &self.attendance, class, range)?)),
            None => Ok(None),
        }
    }

    pub fn overall_summary(&self) -> RepoResult<OverallSummary> {
        overall_summary(&self.classes, &self.students, &self.attendance)
    }

    pub fn daily_roster(
        &self,
        class_id: ClassId,
        date: &str,
        filter: RosterFilter,
        search: &str,
    ) -> RepoResult<DailyRoster> {
        daily_roster(&self.students, &self.attendance, class_id, date, filter, search)
    }

    /// Today's local date, the default day for marking.
    pub fn today() -> String {
        iso_today()
    }
}
