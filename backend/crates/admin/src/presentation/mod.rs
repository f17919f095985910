//! Presentation Layer
//!
//! HTTP handlers, DTOs and the session middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
