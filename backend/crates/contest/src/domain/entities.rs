//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::{RegistrantId, SubmissionId};

use crate::domain::value_objects::{AccessCode, FileCategory};
use crate::error::{ContestError, ContestResult};

/// Validated registration data, not yet persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistrant {
    pub full_name: String,
    pub student_id: String,
    pub pseudonym: String,
}

impl NewRegistrant {
    /// Trim all three fields; the first blank one is reported.
    pub fn new(full_name: &str, student_id: &str, pseudonym: &str) -> ContestResult<Self> {
        let required = |value: &str, field: &'static str| {
            let value = value.trim();
            if value.is_empty() {
                Err(ContestError::MissingField(field))
            } else {
                Ok(value.to_string())
            }
        };

        Ok(Self {
            full_name: required(full_name, "nombre")?,
            student_id: required(student_id, "matricula")?,
            pseudonym: required(pseudonym, "seudonimo")?,
        })
    }
}

/// Registered participant. Never updated or deleted once created.
#[derive(Debug, Clone)]
pub struct Registrant {
    pub id: RegistrantId,
    pub full_name: String,
    pub student_id: String,
    pub pseudonym: String,
    pub access_code: AccessCode,
    pub registered_at: DateTime<Utc>,
}

impl Registrant {
    pub fn from_new(
        id: RegistrantId,
        new: NewRegistrant,
        access_code: AccessCode,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            full_name: new.full_name,
            student_id: new.student_id,
            pseudonym: new.pseudonym,
            access_code,
            registered_at,
        }
    }
}

/// One stored file about to be recorded
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub registrant_id: RegistrantId,
    pub access_code: AccessCode,
    pub stored_filename: String,
    pub category: FileCategory,
    pub submitted_at: DateTime<Utc>,
}

/// Recorded submission file
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub registrant_id: RegistrantId,
    pub access_code: AccessCode,
    pub stored_filename: String,
    pub category: FileCategory,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn recorded(id: SubmissionId, new: NewSubmission) -> Self {
        Self {
            id,
            registrant_id: new.registrant_id,
            access_code: new.access_code,
            stored_filename: new.stored_filename,
            category: new.category,
            submitted_at: new.submitted_at,
        }
    }
}
