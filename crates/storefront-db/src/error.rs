//! # Database Error Types
//!
//! Error types for database operations and for the service layer built on
//! top of them.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError ← DbError (persistence) or CoreError (business rule)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller matches on the variant                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::{CoreError, ValidationError};
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Registering a second customer with the same email
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Order referencing a customer that does not exist
    /// - Line referencing a product that does not exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation (negative stock, negative price, ...).
    #[error("Check constraint violation: {message}")]
    CheckViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed (begin, commit or rollback).
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
                // "CHECK constraint failed: <expr>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::CheckViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Service Error
// =============================================================================

/// What callers of the storefront services receive.
///
/// Business-rule rejections and storage failures are kept apart so a caller
/// can tell "you asked for too many" from "the database is down".
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Rejected by a business rule; nothing was written.
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// Storage failed; any tentative changes were rolled back.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] DbError),
}

impl ServiceError {
    /// The business-rule rejection, if that is what this is.
    pub fn domain(&self) -> Option<&CoreError> {
        match self {
            ServiceError::Domain(err) => Some(err),
            ServiceError::Persistence(_) => None,
        }
    }

    pub fn is_insufficient_stock(&self) -> bool {
        matches!(
            self,
            ServiceError::Domain(CoreError::InsufficientStock { .. })
        )
    }

    pub fn is_invalid_request(&self) -> bool {
        matches!(self, ServiceError::Domain(CoreError::InvalidRequest(_)))
    }

    /// True for a missing row of any entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ServiceError::Domain(CoreError::ProductNotFound { .. })
                | ServiceError::Domain(CoreError::CustomerNotFound(_))
                | ServiceError::Persistence(DbError::NotFound { .. })
        )
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Domain(CoreError::InvalidRequest(err))
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Persistence(DbError::from(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Product", 42);
        assert_eq!(err.to_string(), "Product not found: 42");
    }

    #[test]
    fn test_service_error_classification() {
        let err: ServiceError = CoreError::InsufficientStock {
            product_id: 1,
            available: 2,
            requested: 3,
        }
        .into();
        assert!(err.is_insufficient_stock());
        assert!(!err.is_not_found());
        assert!(err.domain().is_some());

        let err: ServiceError = DbError::not_found("Product", 1).into();
        assert!(err.is_not_found());
        assert!(err.domain().is_none());

        let err: ServiceError = ValidationError::Required {
            field: "lines".to_string(),
        }
        .into();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn test_domain_errors_display_unwrapped() {
        let err: ServiceError = CoreError::ProductNotFound { product_id: 7 }.into();
        assert_eq!(err.to_string(), "Product not found: 7");

        let err: ServiceError = DbError::PoolExhausted.into();
        assert_eq!(
            err.to_string(),
            "Persistence failure: Connection pool exhausted"
        );
    }
}
