//! Local key-value persistence.
//!
//! # Responsibility
//! - Abstract the synchronous, string-keyed storage medium.
//! - Convert typed values to and from JSON at the medium boundary.
//!
//! # Invariants
//! - Storage failures never escape [`PersistentBridge`]; in-memory state stays
//!   authoritative for the rest of the session.
//! - A missing or unreadable entry always loads as the caller's fallback.

mod bridge;
mod store;

pub use bridge::PersistentBridge;
pub use store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of the storage medium or of JSON conversion.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Json(serde_json::Error),
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "json conversion failed: {err}"),
            Self::QuotaExceeded {
                key,
                required,
                quota,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required} bytes needed, quota is {quota}"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::QuotaExceeded { .. } => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}
