//! SQLite-backed history store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{HistoryError, HistoryRecord, HistoryState, HistoryStore};
use crate::search::CloudType;

/// SQLite-backed history store.
pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    /// Open (or create) the database at `path`.
    pub fn new(path: &Path) -> Result<Self, HistoryError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), HistoryError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS history (
                key TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL DEFAULT '',
                cloud_type TEXT,
                state TEXT NOT NULL,
                image TEXT,
                cloud_links TEXT NOT NULL DEFAULT '[]',
                added_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_history_added_at ON history(added_at);
            "#,
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, HistoryError> {
        self.conn
            .lock()
            .map_err(|_| HistoryError::Database("connection lock poisoned".to_string()))
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<HistoryRecord> {
        let state_str: String = row.get(4)?;
        let cloud_type: Option<String> = row.get(3)?;
        let links_json: String = row.get(6)?;
        let added_at_str: String = row.get(7)?;

        let added_at = DateTime::parse_from_rfc3339(&added_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(HistoryRecord {
            key: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            cloud_type: cloud_type.as_deref().and_then(CloudType::from_name),
            state: HistoryState::parse(&state_str).unwrap_or(HistoryState::New),
            image: row.get(5)?,
            cloud_links: serde_json::from_str(&links_json).unwrap_or_default(),
            added_at,
        })
    }
}

impl HistoryStore for SqliteHistoryStore {
    fn get(&self, key: &str) -> Result<Option<HistoryRecord>, HistoryError> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT key, title, content, cloud_type, state, image, cloud_links, added_at
                 FROM history WHERE key = ?",
                params![key],
                Self::row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    fn upsert(&self, record: &HistoryRecord) -> Result<(), HistoryError> {
        let links_json = serde_json::to_string(&record.cloud_links)
            .map_err(|e| HistoryError::Serialization(e.to_string()))?;

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO history (key, title, content, cloud_type, state, image, cloud_links, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(key) DO UPDATE SET
                title = excluded.title,
                content = excluded.content,
                cloud_type = excluded.cloud_type,
                state = excluded.state,
                image = excluded.image,
                cloud_links = excluded.cloud_links,
                added_at = excluded.added_at",
            params![
                record.key,
                record.title,
                record.content,
                record.cloud_type.map(|t| t.name()),
                record.state.as_str(),
                record.image,
                links_json,
                record.added_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), HistoryError> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM history WHERE key = ?", params![key])?;
        if affected == 0 {
            return Err(HistoryError::NotFound(key.to_string()));
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT key, title, content, cloud_type, state, image, cloud_links, added_at
             FROM history ORDER BY added_at DESC, key ASC",
        )?;
        let rows = stmt.query_map([], Self::row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
