//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no contest vocabulary:
//! - Cryptographic utilities (HMAC-SHA256, Base64, constant-time compare)
//! - Password hashing (Argon2id)
//! - Cookie management
//! - Upload filename sanitising

pub mod cookie;
pub mod crypto;
pub mod filename;
pub mod password;
