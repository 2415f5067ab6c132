//! SQLite-backed cache so snippets survive process restarts.

use super::{CacheError, CacheStore};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

/// Durable stat cache. One row per cache key; expired rows are ignored on
/// read and purged opportunistically on write.
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Open or create the cache at `path`. Creates parent dirs if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS stat_cache (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                expires_utc INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_stat_cache_expires ON stat_cache(expires_utc);
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn now_utc() -> i64 {
        time::OffsetDateTime::now_utc().unix_timestamp()
    }
}

#[async_trait]
impl CacheStore for SqliteCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| CacheError::Store(e.to_string()))?;
        let mut stmt =
            conn.prepare("SELECT value FROM stat_cache WHERE key = ?1 AND expires_utc > ?2")?;
        let row = stmt
            .query_row(rusqlite::params![key, Self::now_utc()], |r| {
                r.get::<_, String>(0)
            })
            .optional()?;
        Ok(row)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let now = Self::now_utc();
        let expires = now + ttl.as_secs() as i64;
        let conn = self
            .conn
            .lock()
            .map_err(|e| CacheError::Store(e.to_string()))?;
        conn.execute("DELETE FROM stat_cache WHERE expires_utc <= ?1", [now])?;
        conn.execute(
            "INSERT OR REPLACE INTO stat_cache (key, value, expires_utc) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, expires],
        )?;
        Ok(())
    }
}
