//! Repository Traits
//!
//! Interfaces for persistence. Implementations live in the infra layer.

use chrono::{DateTime, Utc};
use kernel::id::RegistrantId;

use crate::domain::entities::{NewRegistrant, NewSubmission, Registrant, Submission};
use crate::domain::value_objects::{AccessCode, StagedFile, StoredFile};
use crate::error::ContestResult;

/// Registrant repository trait
#[trait_variant::make(RegistrantRepository: Send)]
pub trait LocalRegistrantRepository {
    /// Insert the registrant unless `code` is already taken.
    ///
    /// Returns `None` on a code collision; the check and the insert are a
    /// single atomic statement.
    async fn try_insert(
        &self,
        registrant: &NewRegistrant,
        code: &AccessCode,
        registered_at: DateTime<Utc>,
    ) -> ContestResult<Option<RegistrantId>>;

    /// Exact lookup by access code
    async fn find_by_code(&self, code: &AccessCode) -> ContestResult<Option<Registrant>>;
}

/// Submission repository trait
#[trait_variant::make(SubmissionRepository: Send)]
pub trait LocalSubmissionRepository {
    /// Record all entries in one transaction
    async fn record(&self, entries: &[NewSubmission]) -> ContestResult<Vec<Submission>>;
}

/// Storage for uploaded files, one directory per access code.
///
/// Writes are two-phase: `stage` puts the bytes under a private name and
/// only `promote` makes them visible under their final name, replacing any
/// earlier file of that name.
#[trait_variant::make(FileStore: Send)]
pub trait LocalFileStore {
    async fn stage(&self, code: &AccessCode, filename: &str, bytes: &[u8]) -> ContestResult<StagedFile>;

    async fn promote(&self, staged: &StagedFile) -> ContestResult<()>;

    /// Drop a staged file; a missing one is not an error
    async fn discard(&self, staged: &StagedFile) -> ContestResult<()>;

    /// Open a promoted file for reading; `None` when it does not exist
    async fn open(&self, code: &AccessCode, filename: &str) -> ContestResult<Option<StoredFile>>;
}
