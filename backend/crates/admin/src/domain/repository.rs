//! Repository Traits
//!
//! Interfaces for persistence. Implementations live in the infra layer.

use uuid::Uuid;

use crate::domain::entities::{AdminSession, RegistrantOverview, RegistryEntry, SubmittedFile};
use crate::error::AdminResult;

/// Admin session repository trait
#[trait_variant::make(AdminSessionRepository: Send)]
pub trait LocalAdminSessionRepository {
    async fn create(&self, session: &AdminSession) -> AdminResult<()>;

    async fn find_by_id(&self, session_id: Uuid) -> AdminResult<Option<AdminSession>>;

    async fn delete(&self, session_id: Uuid) -> AdminResult<()>;

    /// Remove every session past its expiry, returning how many were removed
    async fn delete_expired(&self) -> AdminResult<u64>;
}

/// Read-only queries over registrants and submissions
#[trait_variant::make(RegistryQueryRepository: Send)]
pub trait LocalRegistryQueryRepository {
    /// All registrants newest first, each with its submission count
    async fn list_overview(&self) -> AdminResult<Vec<RegistrantOverview>>;

    /// All registrants newest first, no aggregation
    async fn list_registry(&self) -> AdminResult<Vec<RegistryEntry>>;

    /// Submissions recorded under `access_code`, oldest first
    async fn list_files(&self, access_code: &str) -> AdminResult<Vec<SubmittedFile>>;
}
