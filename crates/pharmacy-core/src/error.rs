//! # Error Types
//!
//! Domain-specific error types for pharmacy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pharmacy-core errors (this file)                                      │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  pharmacy-db errors (separate crate)                                   │
//! │  └── DbError          - Database failures, wraps CoreError rejections  │
//! │                                                                         │
//! │  pharmacy-api errors                                                   │
//! │  └── ApiError         - What the dashboard sees (status + detail)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → HTTP         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule rejections.
///
/// Every variant is raised before any write happens, so a `CoreError` never
/// leaves partially applied state behind.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Referenced medicine does not exist.
    #[error("Medicine with ID {0} not found")]
    MedicineNotFound(i64),

    /// Sale does not exist.
    #[error("Sale with ID {0} not found")]
    SaleNotFound(i64),

    /// Insufficient stock to complete a sale.
    ///
    /// ## User Workflow
    /// ```text
    /// Sale line: Amoxicillin × 12
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { medicine: "Amoxicillin", available: 10, requested: 12 }
    ///      │
    ///      ▼
    /// UI shows: "Insufficient quantity for Amoxicillin. Available: 10, Requested: 12"
    /// ```
    #[error("Insufficient quantity for {medicine}. Available: {available}, Requested: {requested}")]
    InsufficientStock {
        medicine: String,
        available: i64,
        requested: i64,
    },

    /// Invoice number is already used by another sale.
    #[error("Invoice number already exists: {0}")]
    DuplicateInvoice(String),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any business logic or I/O runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value exceeds its upper bound.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: i64 },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// MRP is below the cost price.
    #[error("MRP must be greater than or equal to cost price")]
    MrpBelowCost,

    /// A sale was submitted without line items.
    #[error("Sale must contain at least one medicine")]
    EmptySale,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
