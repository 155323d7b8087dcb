//! Idempotent table bootstrap
//!
//! Safe to run on every startup. Column types differ per engine:
//! SQLite keeps ids and timestamps as TEXT (hyphenated UUID, RFC 3339).

use super::client::DbClient;

const SQLITE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id          TEXT PRIMARY KEY NOT NULL,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL,
    phone       TEXT NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS contacts_created_at_idx ON contacts (created_at);
"#;

const POSTGRES_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id          UUID PRIMARY KEY,
    name        VARCHAR(120) NOT NULL,
    email       VARCHAR(255) NOT NULL,
    phone       VARCHAR(20) NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
CREATE INDEX IF NOT EXISTS contacts_created_at_idx ON contacts (created_at);
"#;

/// Create the contacts table and its index if missing.
pub async fn ensure(client: &DbClient) -> Result<(), sqlx::Error> {
    match client {
        DbClient::Sqlite(pool) => {
            sqlx::raw_sql(SQLITE_SCHEMA).execute(pool).await?;
        }
        DbClient::Postgres(pool) => {
            sqlx::raw_sql(POSTGRES_SCHEMA).execute(pool).await?;
        }
    }
    tracing::debug!(engine = %client.engine(), "contacts schema ensured");
    Ok(())
}
