//! Core domain logic for classroom attendance tracking.
//! This crate is the single source of truth for business invariants.

pub mod app;
pub mod config;
pub mod db;
pub mod live;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use app::{AppError, AppResult, AttendanceApp};
pub use config::CoreConfig;
pub use db::Store;
pub use live::{LiveQuery, Table};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::attendance::{
    AttendanceId, AttendanceMark, AttendanceRecord, AttendanceStatus,
};
pub use model::class::{ClassId, ClassRecord, NewClass};
pub use model::student::{NewStudent, StudentId, StudentRecord};
pub use model::validation::{iso_today, validate_iso_date, ValidationError};
pub use report::class_report::{ClassReport, ClassReportRow, DateRange};
pub use report::roster::{DailyRoster, RosterEntry, RosterFilter};
pub use report::stats::{AttendanceBand, AttendanceStats};
pub use report::summary::{ClassAttendanceSummary, OverallSummary};
pub use repo::attendance_repo::{AttendanceRepository, SqliteAttendanceRepository};
pub use repo::class_repo::{ClassRepository, SqliteClassRepository};
pub use repo::student_repo::{SqliteStudentRepository, StudentRepository};
pub use repo::{RepoError, RepoResult};
pub use service::attendance_service::AttendanceService;
pub use service::class_service::ClassService;
pub use service::student_service::StudentService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
