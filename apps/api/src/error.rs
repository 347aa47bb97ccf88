//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Pharmacy API                       │
//! │                                                                         │
//! │  Dashboard                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  POST /api/sales/create-sale                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler: Result<T, ApiError>                                    │  │
//! │  │         │                                                        │  │
//! │  │  DbError::Rejected(CoreError::InsufficientStock) ─┐              │  │
//! │  │  DbError::TransactionFailed("...")  ──────────────┼─► ApiError   │  │
//! │  │  JsonRejection (bad body) ────────────────────────┘      │       │  │
//! │  └──────────────────────────────────────────────────────────┼───────┘  │
//! │                                                             ▼          │
//! │  ◄──────────── 400 {"code":"INSUFFICIENT_STOCK","detail":"..."}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal failures are logged with their cause; the response only carries
//! a generic message.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use ts_rs::TS;

use pharmacy_core::{CoreError, ValidationError};
use pharmacy_db::DbError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error returned from handlers.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Sent to the client as `detail`.
    pub message: String,
}

/// Stable codes the dashboard switches on.
///
/// ## Usage in the Dashboard
/// ```typescript
/// const res = await fetch('/api/sales/create-sale', { method: 'POST', body });
/// if (!res.ok) {
///   const { code, detail } = await res.json();
///   if (code === 'INSUFFICIENT_STOCK') showStockWarning(detail);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Invoice number already used (400)
    Conflict,

    /// Not enough stock for a sale line (400)
    InsufficientStock,

    /// Database operation failed (500)
    DatabaseError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::Conflict | ErrorCode::InsufficientStock => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            code: self.code,
            detail: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let err = match err {
            DbError::Rejected(core) => return core.into(),
            other => other,
        };

        let (code, public) = match &err {
            DbError::Rejected(_) | DbError::Internal(_) => (ErrorCode::Internal, "Internal server error"),
            DbError::NotFound { entity, id } => {
                return ApiError::not_found(format!("{entity} not found: {id}"));
            }
            DbError::UniqueViolation { field, .. } => {
                return ApiError::new(ErrorCode::Conflict, format!("{field} already exists"));
            }
            DbError::ConstraintViolation(_) => (ErrorCode::ValidationError, "Invalid data"),
            DbError::ConnectionFailed(_) | DbError::PoolExhausted => {
                (ErrorCode::DatabaseError, "Database is unavailable")
            }
            DbError::MigrationFailed(_) | DbError::QueryFailed(_) | DbError::TransactionFailed(_) => {
                (ErrorCode::DatabaseError, "Database operation failed")
            }
        };

        if code == ErrorCode::ValidationError {
            tracing::warn!(error = %err, "Store rejected row");
        } else {
            tracing::error!(error = %err, "Storage failure");
        }
        ApiError::new(code, public)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::MedicineNotFound(_) | CoreError::SaleNotFound(_) => {
                ApiError::not_found(message)
            }
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, message)
            }
            CoreError::DuplicateInvoice(_) => {
                ApiError::new(ErrorCode::Conflict, "Invoice number already exists")
            }
            CoreError::Validation(_) => ApiError::validation(message),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
