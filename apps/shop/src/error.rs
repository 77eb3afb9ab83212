//! # Shell Error Type
//!
//! Unified error type for shop commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shop Shell                         │
//! │                                                                         │
//! │  Command Function                                                      │
//! │  Result<T, AppError>                                                   │
//! │         │                                                               │
//! │         ├── Storage failed?   DbError ───────┐                          │
//! │         ├── Cart rejected?    CoreError ─────┤                          │
//! │         ├── Bad config?       ConfigError ───┼──► AppError ──► stderr   │
//! │         └── Choice needed?    (no terminal) ─┘    code + message        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `AppError` serializes as `{"code": "NOT_FOUND", "message": "..."}` so the
//! JSON output mode can report failures in the same shape.

use serde::Serialize;
use std::fmt;

use museum_core::CoreError;
use museum_db::DbError;

use crate::config::ConfigError;

/// Error returned from shop commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown souvenir or cart line
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Cart limit reached
    CartError,

    /// Both discounts apply and no answer could be obtained
    ChoiceRequired,

    /// Configuration could not be loaded
    ConfigError,

    /// Storage operation failed
    DatabaseError,

    /// Internal error
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    pub fn choice_required(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ChoiceRequired, message)
    }
}

/// Converts cart errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Souvenir", &id),
            CoreError::ItemNotInCart(id) => AppError::not_found("Cart item", &id),
            CoreError::CartTooLarge { .. } => AppError::new(ErrorCode::CartError, err.to_string()),
            CoreError::QuantityTooLarge { .. } => AppError::validation(err.to_string()),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

/// Converts storage errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Cart(e) => AppError::from(e),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::QueryFailed(e) | DbError::Internal(e) => {
                tracing::error!("Database operation failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization(e) => {
                AppError::internal(format!("Could not encode cart: {}", e))
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::internal(format!("Prompt failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Could not encode output: {}", err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = AppError::from(CoreError::ProductNotFound("x-1".to_string()));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Souvenir not found: x-1");

        let err = AppError::from(CoreError::CartTooLarge { max: 100 });
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_cart_errors_inside_db_errors_keep_their_code() {
        let err = AppError::from(DbError::Cart(CoreError::ItemNotInCart("a".to_string())));
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err = AppError::from(DbError::QueryFailed("no such table: web_storage".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database operation failed");
    }

    #[test]
    fn test_serialized_shape() {
        let err = AppError::choice_required("pick one");
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, r#"{"code":"CHOICE_REQUIRED","message":"pick one"}"#);
    }
}
