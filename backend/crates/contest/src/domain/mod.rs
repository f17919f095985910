//! Domain Layer - Business logic and entities
//!
//! - Entities (Registrant, Submission)
//! - Value objects (AccessCode, CodeFormat, FileCategory, UploadedFile, StagedFile)
//! - Domain services (access code sampling, stored filename derivation)
//! - Repository and file store traits

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
