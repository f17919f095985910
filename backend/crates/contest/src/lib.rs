//! Contest registration and submission
//!
//! Clean Architecture structure:
//! - `domain/` - Registrants, submissions, access codes, repository traits
//! - `application/` - Register and submit use cases
//! - `infra/` - SQLite repository, on-disk file store, migrations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Invariants
//! - Access codes are unique; uniqueness is enforced by the store, not by a
//!   prior lookup, and collisions are retried a bounded number of times
//! - A submission is only recorded for a registrant found by its code
//! - Both uploaded files are validated before anything is written

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ContestConfig;
pub use domain::value_objects::{AccessCode, CodeFormat, CodeFormatError, FileCategory};
pub use error::{ContestError, ContestResult};
pub use infra::MIGRATOR;
pub use infra::file_store::DiskFileStore;
pub use infra::sqlite::SqliteContestRepository;
pub use presentation::router::{contest_router, contest_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
