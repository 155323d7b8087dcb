//! Command implementations for contactbook CLI

pub mod check;
pub mod db_config;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use check::{run_check, run_format_phone};
pub use db_config::run_db_config;
pub use serve::run_serve;
