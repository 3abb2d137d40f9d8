//! Class (course section) records.

use crate::model::validation::{require_non_blank, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-generated class identifier.
pub type ClassId = i64;

/// Persisted class row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub id: ClassId,
    /// Section name, e.g. `BSIT 3A`.
    pub name: String,
    /// Subject or course name.
    pub subject: String,
}

impl ClassRecord {
    /// Checks required fields before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_class_fields(&self.name, &self.subject)
    }
}

/// Insert payload for a class that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub subject: String,
}

impl NewClass {
    pub fn new(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
        }
    }

    /// Checks required fields before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_class_fields(&self.name, &self.subject)
    }
}

fn validate_class_fields(name: &str, subject: &str) -> Result<(), ValidationError> {
    require_non_blank(name, ValidationError::EmptyClassName)?;
    require_non_blank(subject, ValidationError::EmptySubject)
}
