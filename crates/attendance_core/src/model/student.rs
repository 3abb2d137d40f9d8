//! Student enrollment records.
//!
//! # Invariants
//! - `external_id_number` is unique within one `class_id`, never globally.

use crate::model::class::ClassId;
use crate::model::validation::{require_non_blank, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-generated student identifier.
pub type StudentId = i64;

/// Persisted student row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub id: StudentId,
    pub name: String,
    /// School-issued id number, e.g. `2021-00123`.
    pub external_id_number: String,
    pub class_id: ClassId,
}

impl StudentRecord {
    /// Checks required fields before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_student_fields(&self.name, &self.external_id_number)
    }
}

/// Insert payload for a student that has no id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub external_id_number: String,
    pub class_id: ClassId,
}

impl NewStudent {
    pub fn new(
        name: impl Into<String>,
        external_id_number: impl Into<String>,
        class_id: ClassId,
    ) -> Self {
        Self {
            name: name.into(),
            external_id_number: external_id_number.into(),
            class_id,
        }
    }

    /// Checks required fields before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_student_fields(&self.name, &self.external_id_number)
    }
}

fn validate_student_fields(name: &str, external_id_number: &str) -> Result<(), ValidationError> {
    require_non_blank(name, ValidationError::EmptyStudentName)?;
    require_non_blank(external_id_number, ValidationError::EmptyStudentIdNumber)
}
