//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One query per operation, `RETURNING` instead of re-reading
//! - Missing rows surface as `DbError::NotFound`, never as `Option` in handlers

pub mod contacts;

pub use contacts::{ContactRepo, DbError};
