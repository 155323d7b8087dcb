//! Database target resolution from environment variables
//!
//! Engine selection:
//!   APP_DB_ENGINE          sqlite (default) | postgres
//! URL lookup, first non-empty wins:
//!   SQLITE_DATABASE_URL    when the engine is sqlite
//!   POSTGRES_DATABASE_URL  when the engine is postgres
//!   DATABASE_URL           generic fallback for either engine

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use url::Url;

use crate::error::{ConfigError, ConfigResult};

pub const APP_DB_ENGINE: &str = "APP_DB_ENGINE";

/// Placeholder substituted for credentials in logged URLs
pub const REDACTED_VALUE: &str = "***";

/// `user:password@` inside an authority, for strings `Url` cannot parse
static USERINFO_PASSWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(//[^:/?#\s]+:)([^@/?#\s]+)@").expect("invalid userinfo regex")
});

static SECRET_PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(password|pass|pwd)$").expect("invalid secret param regex"));

/// Database backend family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbEngine {
    /// Embedded file database
    Sqlite,
    /// Client/server database
    Postgres,
}

impl DbEngine {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }

    /// The engine-specific URL variable, preferred over `DATABASE_URL`.
    pub fn url_env_key(self) -> SourceEnvKey {
        match self {
            Self::Sqlite => SourceEnvKey::SqliteDatabaseUrl,
            Self::Postgres => SourceEnvKey::PostgresDatabaseUrl,
        }
    }

    fn parse(raw: Option<&str>) -> ConfigResult<Self> {
        match raw {
            None | Some("") | Some("sqlite") => Ok(Self::Sqlite),
            Some("postgres") => Ok(Self::Postgres),
            Some(other) => Err(ConfigError::invalid_engine(other)),
        }
    }
}

impl fmt::Display for DbEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The environment variable that supplied the active URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceEnvKey {
    #[serde(rename = "SQLITE_DATABASE_URL")]
    SqliteDatabaseUrl,
    #[serde(rename = "POSTGRES_DATABASE_URL")]
    PostgresDatabaseUrl,
    #[serde(rename = "DATABASE_URL")]
    DatabaseUrl,
}

impl SourceEnvKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SqliteDatabaseUrl => "SQLITE_DATABASE_URL",
            Self::PostgresDatabaseUrl => "POSTGRES_DATABASE_URL",
            Self::DatabaseUrl => "DATABASE_URL",
        }
    }
}

impl fmt::Display for SourceEnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved database target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveDatabaseConfig {
    pub engine: DbEngine,
    pub url: String,
    pub source_env_key: SourceEnvKey,
}

impl ActiveDatabaseConfig {
    /// The URL with credentials masked, safe to log.
    pub fn redacted_url(&self) -> String {
        redact_database_url(&self.url)
    }
}

/// Read-only view of environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl<K, V, S> EnvSource for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.as_ref().to_owned())
    }
}

impl<K, V> EnvSource for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.as_ref().to_owned())
    }
}

fn non_empty(env: &impl EnvSource, key: SourceEnvKey) -> Option<String> {
    env.var(key.as_str()).filter(|v| !v.is_empty())
}

/// Pick the database engine and URL from `env`.
///
/// # Errors
///
/// - [`ConfigError::InvalidEngine`] when `APP_DB_ENGINE` is not `sqlite`/`postgres`
/// - [`ConfigError::MissingUrl`] when no URL variable is set for the engine
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use contactbook_core::db_config::{resolve_active_database_config, DbEngine, SourceEnvKey};
///
/// let env = HashMap::from([("SQLITE_DATABASE_URL", "file:../data/contacts.db")]);
/// let config = resolve_active_database_config(&env).unwrap();
/// assert_eq!(config.engine, DbEngine::Sqlite);
/// assert_eq!(config.source_env_key, SourceEnvKey::SqliteDatabaseUrl);
/// ```
pub fn resolve_active_database_config(env: &impl EnvSource) -> ConfigResult<ActiveDatabaseConfig> {
    let engine = DbEngine::parse(env.var(APP_DB_ENGINE).as_deref())?;

    [engine.url_env_key(), SourceEnvKey::DatabaseUrl]
        .into_iter()
        .find_map(|key| {
            non_empty(env, key).map(|url| ActiveDatabaseConfig {
                engine,
                url,
                source_env_key: key,
            })
        })
        .ok_or(ConfigError::MissingUrl { engine })
}

/// [`resolve_active_database_config`] over the process environment.
pub fn resolve_from_process_env() -> ConfigResult<ActiveDatabaseConfig> {
    resolve_active_database_config(&ProcessEnv)
}

/// Mask credentials in a connection URL before it is logged.
///
/// Passwords in the userinfo and `password`/`pass`/`pwd` query parameters
/// become `***`. Strings that are not URLs (bare paths, `file:` URLs) only
/// get a best-effort `user:password@` substitution. Never panics; input with
/// nothing to mask comes back unchanged.
pub fn redact_database_url(url: &str) -> String {
    if !url.contains("://") {
        return redact_with_regex(url);
    }

    match Url::parse(url) {
        Ok(parsed) => redact_parsed(parsed).unwrap_or_else(|| redact_with_regex(url)),
        Err(_) => redact_with_regex(url),
    }
}

/// Whether a query parameter name carries a password (`password`, `pass`, `pwd`, any case).
pub fn is_secret_query_key(key: &str) -> bool {
    SECRET_PARAM_RE.is_match(key)
}

fn redact_with_regex(url: &str) -> String {
    USERINFO_PASSWORD_RE
        .replace_all(url, format!("${{1}}{}@", REDACTED_VALUE))
        .into_owned()
}

/// `None` when the parsed URL carries nothing to mask.
fn redact_parsed(mut parsed: Url) -> Option<String> {
    let mut changed = false;

    if parsed.password().is_some_and(|p| !p.is_empty()) {
        parsed.set_password(Some(REDACTED_VALUE)).ok()?;
        changed = true;
    }

    let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    if pairs.iter().any(|(key, _)| is_secret_query_key(key)) {
        parsed.query_pairs_mut().clear().extend_pairs(pairs.iter().map(|(key, value)| {
            if is_secret_query_key(key) {
                (key.as_str(), REDACTED_VALUE)
            } else {
                (key.as_str(), value.as_str())
            }
        }));
        changed = true;
    }

    changed.then(|| parsed.to_string())
}
