//! Errors raised by the data layer.
//!
//! Two kinds of failure travel through [`DbError`]:
//!
//! ```text
//!   CoreError (rule broken, nothing written) ──► DbError::Rejected(..)  ──┐
//!   sqlx::Error (store misbehaved)           ──► DbError::{QueryFailed, ├──► ApiError
//!                                                 PoolExhausted, ...}  ──┘
//! ```
//!
//! `Rejected` keeps the domain error intact so the HTTP layer can pick the
//! exact status code; everything else is reported as a storage failure.

use pharmacy_core::{CoreError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// `fetch_one` came back empty.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A unique index refused the row; `field` is `table.column`.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A CHECK or NOT NULL constraint refused the row.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error(transparent)]
    Rejected(#[from] CoreError),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A statement inside a sale failed and the sale was rolled back.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Marks an unexpected failure as having aborted a transaction.
    /// Rejections and lookups that came back empty keep their identity.
    pub fn in_transaction(self) -> Self {
        match self {
            DbError::Rejected(_) | DbError::NotFound { .. } | DbError::TransactionFailed(_) => self,
            other => DbError::TransactionFailed(other.to_string()),
        }
    }
}

/// Sorts a SQLite error message into a variant.
///
/// SQLite reports constraint failures as `"<KIND> constraint failed: <detail>"`.
fn classify_sqlite_message(msg: &str) -> DbError {
    if let Some(column) = msg.strip_prefix("UNIQUE constraint failed: ") {
        return DbError::duplicate(column, "unknown");
    }

    let constraint = ["CHECK constraint failed", "NOT NULL constraint failed"]
        .iter()
        .any(|kind| msg.starts_with(kind));

    if constraint {
        DbError::ConstraintViolation(msg.to_string())
    } else {
        DbError::QueryFailed(msg.to_string())
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => classify_sqlite_message(db_err.message()),
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Row".to_string(),
                id: "?".to_string(),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<ValidationError> for DbError {
    fn from(err: ValidationError) -> Self {
        DbError::Rejected(CoreError::Validation(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_messages_are_classified() {
        assert!(matches!(
            classify_sqlite_message("UNIQUE constraint failed: sales.invoice_no"),
            DbError::UniqueViolation { ref field, .. } if field == "sales.invoice_no"
        ));
        assert!(matches!(
            classify_sqlite_message("CHECK constraint failed: quantity >= 0"),
            DbError::ConstraintViolation(_)
        ));
        assert!(matches!(
            classify_sqlite_message("NOT NULL constraint failed: medicines.mrp_minor"),
            DbError::ConstraintViolation(_)
        ));
        assert!(matches!(
            classify_sqlite_message("no such table: medicine"),
            DbError::QueryFailed(_)
        ));
    }

    #[test]
    fn test_rejection_passes_through_transaction_wrapper() {
        let err = DbError::from(CoreError::DuplicateInvoice("INV001".to_string())).in_transaction();
        assert!(matches!(err, DbError::Rejected(CoreError::DuplicateInvoice(_))));
    }

    #[test]
    fn test_unexpected_failure_becomes_transaction_failed() {
        let err = DbError::QueryFailed("disk I/O error".to_string()).in_transaction();
        assert!(matches!(err, DbError::TransactionFailed(ref m) if m.contains("disk I/O error")));
    }

    #[test]
    fn test_validation_error_is_a_rejection() {
        let err: DbError = ValidationError::EmptySale.into();
        assert!(matches!(
            err,
            DbError::Rejected(CoreError::Validation(ValidationError::EmptySale))
        ));
    }
}
