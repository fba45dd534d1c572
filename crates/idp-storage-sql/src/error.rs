//! SQL storage error types.

use idp_storage::StorageError;
use sqlx::Error as SqlxError;

/// Converts a `SQLx` error to a storage error.
#[allow(clippy::needless_pass_by_value)]
pub fn from_sqlx_error(err: SqlxError) -> StorageError {
    match err {
        SqlxError::RowNotFound => {
            // Generic internal error - callers should handle specific not-found cases
            StorageError::Internal("Row not found".to_string())
        }
        SqlxError::Database(db_err) => {
            // PostgreSQL error code 23505: unique constraint violation
            if db_err.code().is_some_and(|c| c == "23505") {
                StorageError::Query(format!("Unique constraint violated: {}", db_err.message()))
            } else if db_err.code().is_some_and(|c| c == "23503") {
                // Foreign key violation
                StorageError::Query(format!("Reference violation: {}", db_err.message()))
            } else {
                StorageError::Query(db_err.to_string())
            }
        }
        SqlxError::PoolTimedOut => StorageError::Connection("Connection pool timeout".to_string()),
        SqlxError::PoolClosed => StorageError::Connection("Connection pool closed".to_string()),
        _ => StorageError::Internal(err.to_string()),
    }
}

/// Converts a write failure, attributing unique violations to the provider
/// name that caused them.
pub fn unique_name_error(err: SqlxError, name: &str) -> StorageError {
    if let SqlxError::Database(db_err) = &err {
        if db_err.code().is_some_and(|c| c == "23505") {
            return StorageError::duplicate("IdentityProvider", "name", name);
        }
    }
    from_sqlx_error(err)
}

/// Creates a not found error for the given entity type and id.
pub const fn not_found(entity_type: &'static str, id: i32) -> StorageError {
    StorageError::not_found(entity_type, id)
}
