//! Mediation layer between callers and the storage access layer.
//!
//! # Responsibility
//! - Expose one method per repository operation with the same signature.
//! - Keep presentation/FFI callers decoupled from SQLite details.
//!
//! # Invariants
//! - Services add no validation, error translation or caching; repository
//!   results and errors pass through unchanged.

pub mod attendance_service;
pub mod class_service;
pub mod student_service;
