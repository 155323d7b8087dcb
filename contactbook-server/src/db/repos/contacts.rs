//! Contact repository
//!
//! Handles contact CRUD for either engine:
//! - SQLite binds `?` placeholders, ids and timestamps as TEXT
//! - PostgreSQL binds `$n` placeholders, native UUID and TIMESTAMPTZ

use chrono::{DateTime, SecondsFormat, Utc};
use contactbook_core::{Contact, ContactInput};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::client::DbClient;

macro_rules! columns {
    () => {
        "id, name, email, phone, created_at, updated_at"
    };
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("stored contact has malformed {column}: '{value}'")]
    Corrupt { column: &'static str, value: String },
}

impl DbError {
    fn contact_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "contact",
            id: id.to_string(),
        }
    }
}

#[derive(Debug, FromRow)]
struct SqliteContactRow {
    id: String,
    name: String,
    email: String,
    phone: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<SqliteContactRow> for Contact {
    type Error = DbError;

    fn try_from(row: SqliteContactRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|_| DbError::Corrupt {
            column: "id",
            value: row.id.clone(),
        })?;
        Ok(Contact {
            id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: parse_timestamp("created_at", &row.created_at)?,
            updated_at: parse_timestamp("updated_at", &row.updated_at)?,
        })
    }
}

#[derive(Debug, FromRow)]
struct PgContactRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PgContactRow> for Contact {
    fn from(row: PgContactRow) -> Self {
        Contact {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn parse_timestamp(column: &'static str, value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| DbError::Corrupt {
            column,
            value: value.to_owned(),
        })
}

/// Fixed-width RFC 3339 in UTC so TEXT ordering matches time ordering
fn sqlite_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn sqlite_rows(rows: Vec<SqliteContactRow>) -> Result<Vec<Contact>, DbError> {
    rows.into_iter().map(Contact::try_from).collect()
}

/// Contact repository
pub struct ContactRepo<'a> {
    client: &'a DbClient,
}

impl<'a> ContactRepo<'a> {
    pub fn new(client: &'a DbClient) -> Self {
        Self { client }
    }

    /// All contacts, newest first.
    pub async fn list(&self) -> Result<Vec<Contact>, DbError> {
        match self.client {
            DbClient::Sqlite(pool) => {
                let rows: Vec<SqliteContactRow> = sqlx::query_as(concat!(
                    "SELECT ",
                    columns!(),
                    " FROM contacts ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(pool)
                .await?;
                sqlite_rows(rows)
            }
            DbClient::Postgres(pool) => {
                let rows: Vec<PgContactRow> = sqlx::query_as(concat!(
                    "SELECT ",
                    columns!(),
                    " FROM contacts ORDER BY created_at DESC, id DESC"
                ))
                .fetch_all(pool)
                .await?;
                Ok(rows.into_iter().map(Contact::from).collect())
            }
        }
    }

    /// The most recently created contact, if any.
    pub async fn latest(&self) -> Result<Option<Contact>, DbError> {
        match self.client {
            DbClient::Sqlite(pool) => {
                let row: Option<SqliteContactRow> = sqlx::query_as(concat!(
                    "SELECT ",
                    columns!(),
                    " FROM contacts ORDER BY created_at DESC, id DESC LIMIT 1"
                ))
                .fetch_optional(pool)
                .await?;
                row.map(Contact::try_from).transpose()
            }
            DbClient::Postgres(pool) => {
                let row: Option<PgContactRow> = sqlx::query_as(concat!(
                    "SELECT ",
                    columns!(),
                    " FROM contacts ORDER BY created_at DESC, id DESC LIMIT 1"
                ))
                .fetch_optional(pool)
                .await?;
                Ok(row.map(Contact::from))
            }
        }
    }

    /// Get a single contact by id.
    pub async fn get(&self, id: Uuid) -> Result<Contact, DbError> {
        let contact = match self.client {
            DbClient::Sqlite(pool) => {
                let row: Option<SqliteContactRow> = sqlx::query_as(concat!(
                    "SELECT ",
                    columns!(),
                    " FROM contacts WHERE id = ?"
                ))
                .bind(id.to_string())
                .fetch_optional(pool)
                .await?;
                row.map(Contact::try_from).transpose()?
            }
            DbClient::Postgres(pool) => {
                let row: Option<PgContactRow> = sqlx::query_as(concat!(
                    "SELECT ",
                    columns!(),
                    " FROM contacts WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(pool)
                .await?;
                row.map(Contact::from)
            }
        };

        contact.ok_or_else(|| DbError::contact_not_found(id))
    }

    /// Insert a new contact with a fresh v4 id.
    pub async fn create(&self, input: &ContactInput) -> Result<Contact, DbError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        match self.client {
            DbClient::Sqlite(pool) => {
                let ts = sqlite_timestamp(now);
                let row: SqliteContactRow = sqlx::query_as(concat!(
                    "INSERT INTO contacts (",
                    columns!(),
                    ") VALUES (?, ?, ?, ?, ?, ?) RETURNING ",
                    columns!()
                ))
                .bind(id.to_string())
                .bind(input.name())
                .bind(input.email())
                .bind(input.phone())
                .bind(&ts)
                .bind(&ts)
                .fetch_one(pool)
                .await?;
                Contact::try_from(row)
            }
            DbClient::Postgres(pool) => {
                let row: PgContactRow = sqlx::query_as(concat!(
                    "INSERT INTO contacts (",
                    columns!(),
                    ") VALUES ($1, $2, $3, $4, $5, $5) RETURNING ",
                    columns!()
                ))
                .bind(id)
                .bind(input.name())
                .bind(input.email())
                .bind(input.phone())
                .bind(now)
                .fetch_one(pool)
                .await?;
                Ok(Contact::from(row))
            }
        }
    }

    /// Replace name, email and phone of an existing contact.
    ///
    /// `id` and `created_at` are left alone; `updated_at` moves to now.
    pub async fn update(&self, id: Uuid, input: &ContactInput) -> Result<Contact, DbError> {
        let now = Utc::now();

        let contact = match self.client {
            DbClient::Sqlite(pool) => {
                let row: Option<SqliteContactRow> = sqlx::query_as(concat!(
                    "UPDATE contacts SET name = ?, email = ?, phone = ?, updated_at = ? WHERE id = ? RETURNING ",
                    columns!()
                ))
                .bind(input.name())
                .bind(input.email())
                .bind(input.phone())
                .bind(sqlite_timestamp(now))
                .bind(id.to_string())
                .fetch_optional(pool)
                .await?;
                row.map(Contact::try_from).transpose()?
            }
            DbClient::Postgres(pool) => {
                let row: Option<PgContactRow> = sqlx::query_as(concat!(
                    "UPDATE contacts SET name = $2, email = $3, phone = $4, updated_at = $5 WHERE id = $1 RETURNING ",
                    columns!()
                ))
                .bind(id)
                .bind(input.name())
                .bind(input.email())
                .bind(input.phone())
                .bind(now)
                .fetch_optional(pool)
                .await?;
                row.map(Contact::from)
            }
        };

        contact.ok_or_else(|| DbError::contact_not_found(id))
    }

    /// Delete a contact. Deleting a missing id is `NotFound`.
    pub async fn delete(&self, id: Uuid) -> Result<(), DbError> {
        let result = match self.client {
            DbClient::Sqlite(pool) => {
                sqlx::query("DELETE FROM contacts WHERE id = ?")
                    .bind(id.to_string())
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
            DbClient::Postgres(pool) => {
                sqlx::query("DELETE FROM contacts WHERE id = $1")
                    .bind(id)
                    .execute(pool)
                    .await?
                    .rows_affected()
            }
        };

        if result == 0 {
            return Err(DbError::contact_not_found(id));
        }
        Ok(())
    }
}
