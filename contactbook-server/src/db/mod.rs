//! Database layer - persistence client and repositories
//!
//! # Design Principles
//!
//! - One client per process, shared through `DbClient::global()`
//! - Engine chosen at startup; repositories dispatch on it per query
//! - Pools connect lazily, so building the client never blocks

pub mod client;
pub mod repos;
pub mod schema;

pub use client::{ClientError, DbClient};
pub use repos::*;
