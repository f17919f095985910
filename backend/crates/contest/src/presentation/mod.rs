//! Presentation Layer
//!
//! HTTP handlers and DTOs for registration and submission.

pub mod dto;
pub mod handlers;
pub mod router;
