//! Persistent storage for computed search results.
//!
//! Uses a separate SQLite file so cache churn is isolated from the content
//! dataset. Rows are keyed by `(combination_id, query_hash)`; writes are
//! last-write-wins, which is safe because a result list is a pure function
//! of its key and the underlying dataset.

use crate::error::{StoreError, StoreResult};
use craftdex_types::CombinationId;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

/// A cached search result row, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResultRow {
    pub combination_id: CombinationId,
    pub query_hash: u32,
    /// Serialized result-id list; the search crate owns the shape.
    pub payload: String,
    /// Unix milliseconds at write time.
    pub created_at: i64,
}

/// Persistent store for cached search results backed by SQLite.
pub struct SearchCacheStore {
    conn: Arc<Mutex<Connection>>,
}

impl SearchCacheStore {
    /// Opens (or creates) a cache store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory cache store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS search_cache (
                combination_id TEXT NOT NULL,
                query_hash INTEGER NOT NULL,
                payload TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (combination_id, query_hash)
            );
            ",
        )?;
        Ok(())
    }

    /// Looks up the cached payload for a key. Returns `None` on miss.
    pub fn fetch(
        &self,
        combination_id: CombinationId,
        query_hash: u32,
    ) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let payload = conn
            .query_row(
                "SELECT payload FROM search_cache
                 WHERE combination_id = ?1 AND query_hash = ?2",
                params![combination_id.to_string(), query_hash as i64],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    /// Upserts a payload for a key with the current timestamp.
    pub fn persist(
        &self,
        combination_id: CombinationId,
        query_hash: u32,
        payload: &str,
    ) -> StoreResult<()> {
        self.persist_at(combination_id, query_hash, payload, now_millis())
    }

    /// Upserts a payload with an explicit write timestamp (unix millis).
    /// Exposed so expiry behavior is testable without waiting.
    pub fn persist_at(
        &self,
        combination_id: CombinationId,
        query_hash: u32,
        payload: &str,
        created_at: i64,
    ) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO search_cache
             (combination_id, query_hash, payload, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                combination_id.to_string(),
                query_hash as i64,
                payload,
                created_at
            ],
        )?;
        Ok(())
    }

    /// Deletes rows older than `max_age`. Returns the number removed.
    /// Intended for a periodic maintenance task, not the request path.
    pub fn cleanup(&self, max_age: Duration) -> StoreResult<usize> {
        let cutoff = now_millis() - max_age.as_millis() as i64;
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute(
            "DELETE FROM search_cache WHERE created_at < ?1",
            params![cutoff],
        )?;
        if removed > 0 {
            info!(removed, "expired search cache rows removed");
        }
        Ok(removed)
    }

    /// Deletes every cached row. Returns the number removed.
    pub fn clear(&self) -> StoreResult<usize> {
        let conn = self.conn.lock().unwrap();
        let removed = conn.execute("DELETE FROM search_cache", [])?;
        info!(removed, "search cache cleared");
        Ok(removed)
    }

    /// Returns the number of cached rows.
    pub fn len(&self) -> StoreResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM search_cache", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Returns true if the cache holds no rows.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Lists every cached row, newest first. Administrative/debug use.
    pub fn entries(&self) -> StoreResult<Vec<CachedResultRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT combination_id, query_hash, payload, created_at
             FROM search_cache ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            let combination: String = row.get(0)?;
            let hash: i64 = row.get(1)?;
            let payload: String = row.get(2)?;
            let created_at: i64 = row.get(3)?;
            Ok((combination, hash, payload, created_at))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (combination, hash, payload, created_at) = row?;
            let combination_id = CombinationId::parse(&combination)
                .map_err(|e| StoreError::InvalidData(format!("invalid combination id: {e}")))?;
            entries.push(CachedResultRow {
                combination_id,
                query_hash: hash as u32,
                payload,
                created_at,
            });
        }
        Ok(entries)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
