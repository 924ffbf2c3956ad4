//! Per-user trip document storage.
//!
//! # Responsibility
//! - Save and load a user's whole trip list as one JSON document.
//! - Keep SQL and document encoding inside the persistence boundary.
//!
//! # Invariants
//! - One document per user; a save replaces the previous one (last write wins).
//! - A user without a document, or a document without a `trips` array, loads
//!   as an empty list.
//! - Undecodable documents are reported, never silently emptied.

use crate::db::DbError;
use crate::model::trip::Trip;
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type TripDocumentResult<T> = Result<T, TripDocumentRepoError>;

#[derive(Debug)]
pub enum TripDocumentRepoError {
    Db(DbError),
    Encode(serde_json::Error),
    InvalidDocument {
        user_id: String,
        source: serde_json::Error,
    },
    EmptyUserId,
}

impl Display for TripDocumentRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode trip document: {err}"),
            Self::InvalidDocument { user_id, source } => {
                write!(f, "stored trip document for `{user_id}` is invalid: {source}")
            }
            Self::EmptyUserId => write!(f, "user id cannot be empty"),
        }
    }
}

impl Error for TripDocumentRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::InvalidDocument { source, .. } => Some(source),
            Self::EmptyUserId => None,
        }
    }
}

impl From<DbError> for TripDocumentRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for TripDocumentRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for whole-list trip documents.
pub trait TripDocumentRepository {
    fn save(&self, user_id: &str, trips: &[Trip]) -> TripDocumentResult<()>;
    fn load(&self, user_id: &str) -> TripDocumentResult<Vec<Trip>>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TripDocumentOut<'a> {
    trips: &'a [Trip],
    updated_at: i64,
}

#[derive(Deserialize)]
struct TripDocumentIn {
    #[serde(default)]
    trips: Option<Vec<Trip>>,
}

/// SQLite-backed document store over the `trip_documents` table.
pub struct SqliteTripDocumentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTripDocumentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Last save time (epoch ms) for `user_id`, if a document exists.
    pub fn updated_at(&self, user_id: &str) -> TripDocumentResult<Option<i64>> {
        let user_id = normalize_user_id(user_id)?;
        let updated_at = self
            .conn
            .query_row(
                "SELECT updated_at FROM trip_documents WHERE user_id = ?1;",
                [user_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(updated_at)
    }
}

impl TripDocumentRepository for SqliteTripDocumentRepository<'_> {
    fn save(&self, user_id: &str, trips: &[Trip]) -> TripDocumentResult<()> {
        let user_id = normalize_user_id(user_id)?;
        let updated_at = now_epoch_ms();
        let payload = serde_json::to_string(&TripDocumentOut { trips, updated_at })
            .map_err(TripDocumentRepoError::Encode)?;

        self.conn.execute(
            "INSERT INTO trip_documents (user_id, payload, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(user_id) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![user_id, payload, updated_at],
        )?;
        Ok(())
    }

    fn load(&self, user_id: &str) -> TripDocumentResult<Vec<Trip>> {
        let user_id = normalize_user_id(user_id)?;
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM trip_documents WHERE user_id = ?1;",
                [user_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(Vec::new());
        };
        let document: TripDocumentIn = serde_json::from_str(&payload).map_err(|source| {
            TripDocumentRepoError::InvalidDocument {
                user_id: user_id.to_string(),
                source,
            }
        })?;
        Ok(document.trips.unwrap_or_default())
    }
}

fn normalize_user_id(user_id: &str) -> TripDocumentResult<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(TripDocumentRepoError::EmptyUserId);
    }
    Ok(trimmed)
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
}

#[cfg(test)]
mod tests {
    use super::{normalize_user_id, TripDocumentRepoError};

    #[test]
    fn user_id_is_trimmed_and_required() {
        assert_eq!(normalize_user_id("  alice ").unwrap(), "alice");
        assert!(matches!(
            normalize_user_id("   "),
            Err(TripDocumentRepoError::EmptyUserId)
        ));
    }
}
