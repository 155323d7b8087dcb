/// Structured error types for contactbook-core.
///
/// Uses `thiserror` so library consumers get composable errors.
/// The binary crate (contactbook-cli) wraps these with `anyhow` context.
use thiserror::Error;

use crate::db_config::DbEngine;

/// Configuration error raised while resolving the active database.
///
/// These are fatal at startup: without a database target the application
/// cannot serve anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `APP_DB_ENGINE` holds something other than `sqlite` or `postgres`
    #[error("Invalid APP_DB_ENGINE value \"{value}\". Expected \"sqlite\" or \"postgres\".")]
    InvalidEngine { value: String },

    /// Neither the engine-specific variable nor `DATABASE_URL` is set
    #[error("Missing database URL. Set {} (or DATABASE_URL fallback).", .engine.url_env_key().as_str())]
    MissingUrl { engine: DbEngine },
}

/// Result type alias for configuration resolution
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create an invalid engine error
    pub fn invalid_engine(value: impl Into<String>) -> Self {
        Self::InvalidEngine {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_engine_names_the_value() {
        let err = ConfigError::invalid_engine("mysql");
        assert_eq!(
            err.to_string(),
            r#"Invalid APP_DB_ENGINE value "mysql". Expected "sqlite" or "postgres"."#
        );
    }

    #[test]
    fn missing_url_names_engine_variable() {
        let err = ConfigError::MissingUrl {
            engine: DbEngine::Postgres,
        };
        assert_eq!(
            err.to_string(),
            "Missing database URL. Set POSTGRES_DATABASE_URL (or DATABASE_URL fallback)."
        );

        let err = ConfigError::MissingUrl {
            engine: DbEngine::Sqlite,
        };
        assert!(err.to_string().contains("SQLITE_DATABASE_URL"));
    }
}
