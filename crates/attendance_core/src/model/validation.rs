//! Write-time validation rules and ISO date helpers.
//!
//! # Invariants
//! - An ISO date is exactly `yyyy-MM-dd` and names a real calendar day.
//! - Validation never touches storage.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Validation failures raised before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyClassName,
    EmptySubject,
    EmptyStudentName,
    EmptyStudentIdNumber,
    /// Value is not a real `yyyy-MM-dd` date.
    InvalidDate(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyClassName => write!(f, "class name is required"),
            Self::EmptySubject => write!(f, "subject name is required"),
            Self::EmptyStudentName => write!(f, "student name is required"),
            Self::EmptyStudentIdNumber => write!(f, "student id number is required"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected yyyy-MM-dd")
            }
        }
    }
}

impl Error for ValidationError {}

/// Checks that `value` is an exact ISO `yyyy-MM-dd` calendar date.
pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    if !ISO_DATE_RE.is_match(value) {
        return Err(ValidationError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Formats a date the way it is persisted.
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Returns today's local date in persisted form.
pub fn iso_today() -> String {
    to_iso_date(Local::now().date_naive())
}

pub(crate) fn require_non_blank(value: &str, error: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}
