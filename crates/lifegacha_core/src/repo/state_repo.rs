//! Persisted document store.
//!
//! # Responsibility
//! - Read and write the app document wholesale under one fixed key.
//! - Provide the first-run insert that never overwrites an existing save.
//!
//! # Invariants
//! - No field-level access: the stored value is always a whole document.
//! - Unparseable stored text reads as "no document" so defaulting can
//!   repair it; it is never surfaced as an error.

use crate::db::DbError;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Key the app document is stored under.
pub const STORAGE_KEY: &str = "lifeGachaData";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store access failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode state document: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
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

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Wholesale document storage.
pub trait StateRepository {
    /// Returns the stored document, or `None` when nothing usable is stored.
    fn load_document(&self) -> RepoResult<Option<Value>>;
    /// Replaces the stored document.
    fn save_document(&self, document: &Value) -> RepoResult<()>;
    /// Stores `document` only if no document exists; returns whether it did.
    fn insert_document_if_absent(&self, document: &Value) -> RepoResult<bool>;
}

/// SQLite-backed document store over the `kv_entries` table.
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
    key: &'static str,
}

impl<'conn> SqliteStateRepository<'conn> {
    /// Uses the standard `STORAGE_KEY`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_key(conn, STORAGE_KEY)
    }

    pub fn with_key(conn: &'conn Connection, key: &'static str) -> Self {
        Self { conn, key }
    }

    fn load_raw(&self) -> RepoResult<Option<String>> {
        let raw = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                params![self.key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(raw)
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn load_document(&self) -> RepoResult<Option<Value>> {
        let Some(raw) = self.load_raw()? else {
            return Ok(None);
        };

        match serde_json::from_str::<Value>(raw.as_str()) {
            Ok(Value::Null) => Ok(None),
            Ok(document) => Ok(Some(document)),
            Err(err) => {
                warn!(
                    "event=state_load module=repo status=repaired key={} reason=invalid_json error={}",
                    self.key, err
                );
                Ok(None)
            }
        }
    }

    fn save_document(&self, document: &Value) -> RepoResult<()> {
        let encoded = serde_json::to_string(document)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key, encoded, now_epoch_ms()],
        )?;
        Ok(())
    }

    fn insert_document_if_absent(&self, document: &Value) -> RepoResult<bool> {
        // A row holding unusable text counts as absent, matching `load_document`.
        if self.load_document()?.is_some() {
            return Ok(false);
        }
        self.save_document(document)?;
        Ok(true)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
