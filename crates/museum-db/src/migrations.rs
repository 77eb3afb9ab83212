//! # Database Migrations
//!
//! Embedded SQL migrations, applied when the database is opened.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations. Safe to run more than once.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use crate::repository::storage::StorageArea;

    #[tokio::test]
    async fn test_schema_is_created_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.storage()
            .set_item(StorageArea::Local, "k", "v")
            .await
            .unwrap();

        // re-running is a no-op and keeps the data
        db.run_migrations().await.unwrap();
        assert_eq!(
            db.storage().get_item(StorageArea::Local, "k").await.unwrap(),
            Some("v".to_string())
        );
    }

    #[tokio::test]
    async fn test_skipped_migrations_leave_no_table() {
        let db = Database::new(DbConfig::in_memory().skip_migrations())
            .await
            .unwrap();
        assert!(db.storage().keys(StorageArea::Local).await.is_err());
    }
}
