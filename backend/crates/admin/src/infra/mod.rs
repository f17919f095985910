//! Infrastructure Layer - Database implementations

pub mod sqlite;
