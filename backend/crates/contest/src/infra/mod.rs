//! Infrastructure Layer - SQLite and filesystem implementations

pub mod file_store;
pub mod sqlite;

/// Schema for registrants, submissions and admin sessions
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../../database/migrations");
