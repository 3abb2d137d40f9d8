//! Attendance aggregation and report read models.
//!
//! # Responsibility
//! - Derive per-student statistics over all history or a date range.
//! - List per-student statistics of a class, optionally range-filtered.
//! - Roll student statistics up into class and overall summaries.
//! - Build the daily roster view used while marking attendance.
//!
//! # Invariants
//! - `Late` counts as attended in every percentage.
//! - A zero denominator yields `0.0`, never NaN.
//! - Reports read through the service layer only.

pub mod class_report;
pub mod roster;
pub mod stats;
pub mod summary;
