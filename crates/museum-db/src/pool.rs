//! # Storage Handle
//!
//! Opens the SQLite file that plays the part of the browser's storage.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path)         file on disk, WAL, created when missing    │
//! │  DbConfig::in_memory()       one private connection, gone on close      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  Database::new(config) ──► pool ──► migrations ──► expire idle session  │
//! │        │                                                                │
//! │        ├── storage()   raw local/session key-value access               │
//! │        ├── carts()     the persisted cart                               │
//! │        └── choices()   the member/volume answer                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories are cheap handles over a clone of the pool. A shell run
//! opens one `Database`, does its command and closes it.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use chrono::TimeDelta;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::cart::CartRepository;
use crate::repository::choice::ChoiceRepository;
use crate::repository::storage::StorageRepository;

const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(60 * 60);

/// Where the storage lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    Memory,
}

/// How to open the storage.
///
/// ```rust,ignore
/// let db = Database::new(DbConfig::new(path).pool_size(2)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: StorageLocation,

    /// Connections in the pool. Always 1 in memory, where every
    /// connection would otherwise see its own empty database.
    pub pool_size: u32,

    /// How long a command waits for a free connection.
    pub acquire_timeout: Duration,

    /// How long SQLite waits on a lock held by another shell process.
    pub busy_timeout: Duration,

    /// Apply pending migrations while opening. Default: true
    pub migrate: bool,

    /// The session area is cleared on open once nothing was written to it
    /// for this long. Default: 60 minutes
    pub session_idle: Duration,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: StorageLocation::File(path.into()),
            pool_size: 2,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(5),
            migrate: true,
            session_idle: DEFAULT_SESSION_IDLE,
        }
    }

    /// Private throwaway storage for tests.
    pub fn in_memory() -> Self {
        DbConfig {
            location: StorageLocation::Memory,
            pool_size: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
            migrate: true,
            session_idle: DEFAULT_SESSION_IDLE,
        }
    }

    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = match self.location {
            StorageLocation::Memory => 1,
            StorageLocation::File(_) => size.max(1),
        };
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn session_idle(mut self, idle: Duration) -> Self {
        self.session_idle = idle;
        self
    }

    /// Opens without migrating or expiring the session.
    pub fn skip_migrations(mut self) -> Self {
        self.migrate = false;
        self
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        match &self.location {
            StorageLocation::Memory => SqliteConnectOptions::new(),
            StorageLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .busy_timeout(self.busy_timeout),
        }
    }
}

/// Open storage with access to its repositories.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        match &config.location {
            StorageLocation::File(path) => info!(path = %path.display(), "Opening storage"),
            StorageLocation::Memory => debug!("Opening in-memory storage"),
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            // in-memory data lives only as long as its connection
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let db = Database { pool };
        if config.migrate {
            db.run_migrations().await?;

            let idle = TimeDelta::from_std(config.session_idle)
                .map_err(|e| DbError::Internal(format!("session idle time: {}", e)))?;
            db.storage().expire_idle_session(idle).await?;
        }

        debug!(pool_size = config.pool_size, "Storage ready");
        Ok(db)
    }

    /// Applies pending migrations. Already-applied ones are skipped.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Raw key-value access to the local and session areas.
    pub fn storage(&self) -> StorageRepository {
        StorageRepository::new(self.pool.clone())
    }

    /// The persisted cart.
    pub fn carts(&self) -> CartRepository {
        CartRepository::new(self.storage())
    }

    /// The shopper's member/volume answer.
    pub fn choices(&self) -> ChoiceRepository {
        ChoiceRepository::new(self.storage())
    }

    /// Waits for open queries, then closes every connection. Repositories
    /// handed out earlier fail from here on.
    pub async fn close(&self) {
        debug!("Closing storage");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::storage::StorageArea;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("museum-db-{}-{}.db", std::process::id(), nanos))
    }

    fn remove_scratch(path: &std::path::Path) {
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.storage().keys(StorageArea::Local).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_database_refuses_work() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(db.storage().keys(StorageArea::Local).await.is_err());
    }

    #[tokio::test]
    async fn test_file_storage_survives_reopen() {
        let path = scratch_file();

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.storage()
            .set_item(StorageArea::Local, "greeting", "hello")
            .await
            .unwrap();
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let value = db
            .storage()
            .get_item(StorageArea::Local, "greeting")
            .await
            .unwrap();
        db.close().await;
        remove_scratch(&path);

        assert_eq!(value.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_reopen_after_idle_ends_session() {
        let path = scratch_file();

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.storage()
            .set_item(StorageArea::Session, "museumCartChoice", "member")
            .await
            .unwrap();
        db.storage()
            .set_item(StorageArea::Local, "museumCartV1", "[]")
            .await
            .unwrap();
        db.close().await;

        let config = DbConfig::new(&path).session_idle(Duration::ZERO);
        let db = Database::new(config).await.unwrap();
        let session = db.storage().keys(StorageArea::Session).await.unwrap();
        let local = db.storage().keys(StorageArea::Local).await.unwrap();
        db.close().await;
        remove_scratch(&path);

        assert!(session.is_empty());
        assert_eq!(local, vec!["museumCartV1"]);
    }

    #[test]
    fn test_memory_pool_stays_single() {
        let config = DbConfig::in_memory().pool_size(8);
        assert_eq!(config.pool_size, 1);

        let config = DbConfig::new("/tmp/museum.db").pool_size(0).skip_migrations();
        assert_eq!(config.pool_size, 1);
        assert!(!config.migrate);
    }
}
