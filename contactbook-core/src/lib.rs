//! contactbook-core: contact domain shared by the server and the CLI
//!
//! - [`validation`]: field rules for name, email, phone and contact ids
//! - [`format`]: phone display and clipboard text
//! - [`db_config`]: engine/URL resolution from the environment, URL redaction

pub mod contact;
pub mod db_config;
pub mod error;
pub mod format;
pub mod validation;

pub use contact::{Contact, ContactInput, RawContactInput};
pub use db_config::{
    is_secret_query_key, redact_database_url, resolve_active_database_config, resolve_from_process_env,
    ActiveDatabaseConfig, DbEngine, EnvSource, ProcessEnv, SourceEnvKey,
};
pub use error::{ConfigError, ConfigResult};
pub use format::{build_contact_email_clipboard_text, format_us_phone_number};
pub use validation::{validate_contact_id, validate_contact_input, Field, FieldErrors};
