//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary that every crate in the workspace agrees on:
//! - The unified [`error::app_error::AppError`] and its HTTP mapping
//! - Typed row identifiers for registrants and submissions
//!
//! Nothing contest- or admin-specific belongs here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
