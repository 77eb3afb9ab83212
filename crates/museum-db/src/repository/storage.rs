//! # Storage Repository
//!
//! The `localStorage` / `sessionStorage` API over one SQLite table.
//!
//! Values are opaque text. Setting a key overwrites it; removing a missing
//! key is not an error, matching the browser API.
//!
//! ## Session Boundary
//! A browser drops `sessionStorage` when the tab closes. The shell has no
//! tab, so the session area ends when nothing was written to it for the
//! configured idle time ([`StorageRepository::expire_idle_session`], run
//! on every open) or when the shopper clears the cart.

use chrono::{DateTime, TimeDelta, Utc};
use sqlx::{FromRow, SqlitePool};
use std::fmt;
use tracing::{debug, info};

use crate::error::DbResult;

/// One of the two storage areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageArea {
    /// Survives restarts.
    Local,
    /// Per-shopping-session state. Expires when idle.
    Session,
}

impl StorageArea {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageArea::Local => "local",
            StorageArea::Session => "session",
        }
    }
}

impl fmt::Display for StorageArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored key with its value and last write time.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct StorageEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for raw key-value access.
#[derive(Debug, Clone)]
pub struct StorageRepository {
    pool: SqlitePool,
}

impl StorageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StorageRepository { pool }
    }

    /// Reads a value, `None` when the key is absent.
    pub async fn get_item(&self, area: StorageArea, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM web_storage WHERE area = ?1 AND key = ?2",
        )
        .bind(area.as_str())
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }

    /// Writes a value, replacing any previous one.
    pub async fn set_item(&self, area: StorageArea, key: &str, value: &str) -> DbResult<()> {
        debug!(area = %area, key = %key, bytes = value.len(), "Storing item");

        sqlx::query(
            r#"
            INSERT INTO web_storage (area, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (area, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(area.as_str())
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes a key. Returns whether it existed.
    pub async fn remove_item(&self, area: StorageArea, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM web_storage WHERE area = ?1 AND key = ?2")
            .bind(area.as_str())
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(area = %area, key = %key, removed = result.rows_affected(), "Removed item");
        Ok(result.rows_affected() > 0)
    }

    /// Removes every key in an area. Returns the number removed.
    pub async fn clear_area(&self, area: StorageArea) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM web_storage WHERE area = ?1")
            .bind(area.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Keys in an area, sorted.
    pub async fn keys(&self, area: StorageArea) -> DbResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>(
            "SELECT key FROM web_storage WHERE area = ?1 ORDER BY key",
        )
        .bind(area.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }

    /// Full entries in an area, sorted by key.
    pub async fn entries(&self, area: StorageArea) -> DbResult<Vec<StorageEntry>> {
        let entries = sqlx::query_as::<_, StorageEntry>(
            "SELECT key, value, updated_at FROM web_storage WHERE area = ?1 ORDER BY key",
        )
        .bind(area.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Clears the session area when its newest write is at least `idle`
    /// old. Returns whether a session ended.
    pub async fn expire_idle_session(&self, idle: TimeDelta) -> DbResult<bool> {
        let entries = self.entries(StorageArea::Session).await?;
        let Some(last_write) = entries.iter().map(|e| e.updated_at).max() else {
            return Ok(false);
        };

        let idle_for = Utc::now() - last_write;
        if idle_for < idle {
            return Ok(false);
        }

        let removed = self.clear_area(StorageArea::Session).await?;
        info!(
            removed,
            idle_minutes = idle_for.num_minutes(),
            "Shopping session expired"
        );
        Ok(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
