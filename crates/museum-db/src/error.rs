//! # Storage Errors
//!
//! ```text
//!   sqlx::Error ───────┐
//!   MigrateError ──────┼──► DbError ──► AppError (shell: code + message)
//!   CoreError (cart) ──┘
//! ```
//!
//! A corrupt cart blob is NOT an error at this level: the cart repository
//! resets it and returns an empty cart.

use museum_core::CoreError;
use thiserror::Error;

/// Failures while reading or writing the shop's storage.
#[derive(Debug, Error)]
pub enum DbError {
    /// The SQLite file could not be opened (missing directory, permissions,
    /// full disk) or the pool was already closed.
    #[error("Cannot open storage: {0}")]
    ConnectionFailed(String),

    #[error("Storage schema upgrade failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement.
    #[error("Storage query failed: {0}")]
    QueryFailed(String),

    /// Every connection stayed busy past the acquire timeout, usually
    /// another shell process holding a write lock.
    #[error("Storage is busy, try again")]
    PoolExhausted,

    /// A value could not be encoded for storage.
    #[error("Cannot encode stored value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A cart mutation inside a read-modify-write was rejected.
    #[error(transparent)]
    Cart(#[from] CoreError),

    #[error("Unexpected storage error: {0}")]
    Internal(String),
}

/// ```text
/// Database(e)    → QueryFailed(e.message)
/// PoolTimedOut   → PoolExhausted
/// PoolClosed     → ConnectionFailed
/// anything else  → Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => {
                DbError::ConnectionFailed("storage already closed".to_string())
            }
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_cart_error_is_transparent() {
        let err = DbError::from(CoreError::ItemNotInCart("arch-001".to_string()));
        assert_eq!(err.to_string(), "Item arch-001 is not in the cart");
    }
}
