//! Attendance domain model.
//!
//! # Responsibility
//! - Define the three persisted records (class, student, attendance).
//! - Own write-time validation shared by every repository.
//!
//! # Invariants
//! - Ids are generated by storage and never reused within one database.
//! - A class owns its students; a student owns its attendance records.
//! - Attendance dates are ISO `yyyy-MM-dd` strings so that lexicographic
//!   order equals chronological order.

pub mod attendance;
pub mod class;
pub mod student;
pub mod validation;
