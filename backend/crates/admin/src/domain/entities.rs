//! Domain Entities

use chrono::{DateTime, Duration, Utc};
use kernel::id::{RegistrantId, SubmissionId};
use uuid::Uuid;

/// Server-side admin session
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl AdminSession {
    /// TTL is provided by the application layer (config).
    pub fn new(ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}

/// Registrant with the number of files submitted under its code
#[derive(Debug, Clone)]
pub struct RegistrantOverview {
    pub id: RegistrantId,
    pub registered_at: DateTime<Utc>,
    pub pseudonym: String,
    pub access_code: String,
    pub student_id: String,
    pub file_count: i64,
}

/// Raw registrant row as kept in the registry
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub id: RegistrantId,
    pub registered_at: DateTime<Utc>,
    pub full_name: String,
    pub student_id: String,
    pub pseudonym: String,
    pub access_code: String,
}

/// One stored file of a registrant
#[derive(Debug, Clone)]
pub struct SubmittedFile {
    pub id: SubmissionId,
    pub stored_filename: String,
    pub category: String,
    pub submitted_at: DateTime<Utc>,
}
