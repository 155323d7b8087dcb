//! contactbook-server: contact list HTTP API
//!
//! Persists contacts through a single process-wide client bound to SQLite
//! or PostgreSQL, chosen from the environment at startup.

pub mod db;
pub mod http;

pub use db::{ClientError, ContactRepo, DbClient, DbError};
pub use http::{build_router, run_server, ServerConfig};
