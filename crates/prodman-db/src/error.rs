//! # Database Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)     stored row fails domain validation     │
//! │       │                                  │                              │
//! │       ▼                                  ▼                              │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (product-manager) ← status code + safe message           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use prodman_core::CoreError;
use thiserror::Error;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - `update` or `delete` of a SKU that is not stored
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a duplicate SKU or product name
    /// - Registering a duplicate email or user name
    /// - Any UNIQUE index violation
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Warehouse or sales row for a SKU with no catalog row
    /// - user_roles row pointing at a missing user or role
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    ///
    /// ## When This Occurs
    /// - Runtime SQL error, including trigger aborts
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored row could not be turned back into a domain value.
    ///
    /// ## When This Occurs
    /// - A UUID column holds something that isn't a UUID
    /// - Stored values violate a value-object rule (edited by hand, old data)
    #[error("Corrupt {entity} row: {reason}")]
    CorruptRow { entity: String, reason: String },

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates a CorruptRow error.
    pub fn corrupt(entity: impl Into<String>, reason: impl ToString) -> Self {
        DbError::CorruptRow {
            entity: entity.into(),
            reason: reason.to_string(),
        }
    }

    /// Fills in the offending value of a `UniqueViolation`.
    ///
    /// SQLite only names the column, so callers pass the `(column, value)`
    /// pairs they just wrote. Other errors pass through unchanged.
    pub fn with_unique_value(self, written: &[(&str, &str)]) -> Self {
        match self {
            DbError::UniqueViolation { field, value } => {
                let value = written
                    .iter()
                    .find(|(column, _)| *column == field)
                    .map(|(_, written)| written.to_string())
                    .unwrap_or(value);
                DbError::UniqueViolation { field, value }
            }
            other => other,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
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
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
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

/// Rehydration failures: the row exists but is not a valid domain value.
impl From<CoreError> for DbError {
    fn from(err: CoreError) -> Self {
        DbError::corrupt("domain", err)
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;
    use prodman_core::ValidationError;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(DbError::from(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn test_unique_value_filled_from_written_columns() {
        let err = DbError::duplicate("users.name", "unknown")
            .with_unique_value(&[("users.email", "a@b.com"), ("users.name", "Alice")]);
        assert_eq!(err.to_string(), "Duplicate users.name: 'Alice' already exists");

        // Unlisted column keeps what it had
        let err = DbError::duplicate("roles.name", "unknown").with_unique_value(&[("users.name", "Alice")]);
        assert!(matches!(err, DbError::UniqueViolation { ref value, .. } if value == "unknown"));

        assert!(DbError::not_found("Product", "1")
            .with_unique_value(&[("users.name", "Alice")])
            .is_not_found());
    }

    #[test]
    fn test_pool_errors() {
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::PoolExhausted));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_core_error_becomes_corrupt_row() {
        let err = DbError::from(CoreError::from(ValidationError::InvalidSku));
        assert!(matches!(err, DbError::CorruptRow { .. }));
        assert!(err.to_string().contains("alphanumeric"));
    }
}
