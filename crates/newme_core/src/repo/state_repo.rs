//! Namespaced state payload repository.
//!
//! # Responsibility
//! - Load and save one opaque payload per stable namespace key.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Namespaces are non-blank.
//! - Saving an existing namespace replaces its payload.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for state payloads.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidNamespace(String),
    Encode {
        namespace: String,
        source: serde_json::Error,
    },
    Decode {
        namespace: String,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidNamespace(value) => write!(f, "invalid state namespace: `{value}`"),
            Self::Encode { namespace, source } => {
                write!(f, "failed to encode state `{namespace}`: {source}")
            }
            Self::Decode { namespace, source } => {
                write!(f, "failed to decode state `{namespace}`: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidNamespace(_) => None,
            Self::Encode { source, .. } | Self::Decode { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for namespaced state payloads.
pub trait StateRepository {
    /// Returns `None` when nothing was ever saved under `namespace`.
    fn load_payload(&self, namespace: &str) -> RepoResult<Option<String>>;
    fn save_payload(&self, namespace: &str, payload: &str) -> RepoResult<()>;
}

/// SQLite-backed state repository over the `app_state` table.
pub struct SqliteStateRepository {
    conn: Connection,
}

impl SqliteStateRepository {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl StateRepository for SqliteStateRepository {
    fn load_payload(&self, namespace: &str) -> RepoResult<Option<String>> {
        let namespace = normalize_namespace(namespace)?;
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM app_state WHERE namespace = ?1;",
                [namespace],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save_payload(&self, namespace: &str, payload: &str) -> RepoResult<()> {
        let namespace = normalize_namespace(namespace)?;
        self.conn.execute(
            "INSERT INTO app_state (namespace, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(namespace) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![namespace, payload],
        )?;
        Ok(())
    }
}

fn normalize_namespace(namespace: &str) -> RepoResult<&str> {
    let trimmed = namespace.trim();
    if trimmed.is_empty() {
        return Err(RepoError::InvalidNamespace(namespace.to_string()));
    }
    Ok(trimmed)
}
