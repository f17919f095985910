//! Contest administration
//!
//! Clean Architecture structure:
//! - `domain/` - Admin sessions, registry read models, repository traits
//! - `application/` - Sign-in/out, session check, registry queries, export, download
//! - `infra/` - SQLite repository
//! - `presentation/` - HTTP handlers, DTOs, session middleware, router
//!
//! ## Security Model
//! - A single shared password, stored only as an Argon2id PHC hash
//! - Server-side sessions referenced by an HMAC-signed opaque cookie
//! - Every route except login/logout sits behind the session middleware;
//!   requests without a valid session are redirected to the login page

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AdminConfig;
pub use application::export_registry::ExportRegistryUseCase;
pub use error::{AdminError, AdminResult};
pub use infra::sqlite::SqliteAdminRepository;
pub use presentation::router::{admin_router, admin_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
