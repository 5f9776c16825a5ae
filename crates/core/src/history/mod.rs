//! Acquisition history.
//!
//! Remembers, per upstream content item, whether share links were already
//! found so the item is not searched again.

mod sqlite;
mod types;

pub use sqlite::SqliteHistoryStore;
pub use types::{HistoryRecord, HistoryState};

use thiserror::Error;

/// Errors from history storage.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("History record not found: {0}")]
    NotFound(String),
}

impl From<rusqlite::Error> for HistoryError {
    fn from(e: rusqlite::Error) -> Self {
        HistoryError::Database(e.to_string())
    }
}

/// Trait for history storage.
pub trait HistoryStore: Send + Sync {
    /// Get the record for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<HistoryRecord>, HistoryError>;

    /// Insert or replace the record for `record.key`.
    fn upsert(&self, record: &HistoryRecord) -> Result<(), HistoryError>;

    /// Delete the record for `key`. Fails with `NotFound` if absent.
    fn delete(&self, key: &str) -> Result<(), HistoryError>;

    /// All records, newest first.
    fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError>;
}
