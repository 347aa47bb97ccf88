//! # pharmacy-core: Pure Business Logic for the Pharmacy POS
//!
//! This crate holds the domain model and every business rule as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Pharmacy POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Dashboard UI (external)                      │   │
//! │  │    Inventory page ──► Sale dialog ──► Dashboard stats           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pharmacy-api (axum)                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pharmacy-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  ledger   │  │ validation│  │   │
//! │  │   │ Medicine  │  │   Money   │  │  status   │  │   rules   │  │   │
//! │  │   │   Sale    │  │  (paise)  │  │ derivation│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO CLOCK                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  pharmacy-db (Database Layer)                   │   │
//! │  │        SQLite queries, migrations, sale transactions            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Medicine, Sale, line items, stats)
//! - [`money`] - Money type with integer arithmetic
//! - [`ledger`] - Medicine status derivation and record validation
//! - [`validation`] - Field-level and sale request validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pharmacy_core::ledger::derive_status;
//! use pharmacy_core::MedicineStatus;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let expiry = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
//!
//! assert_eq!(derive_status(15, expiry, today), MedicineStatus::LowStock);
//! assert_eq!(derive_status(0, expiry, today), MedicineStatus::OutOfStock);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level below which a medicine is flagged "Low Stock".
pub const LOW_STOCK_THRESHOLD: i64 = 20;

/// Default page size for medicine listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Largest page a single listing request may ask for.
pub const MAX_PAGE_LIMIT: i64 = 500;

/// Number of sales shown on the dashboard when the caller gives no limit.
pub const DEFAULT_RECENT_SALES_LIMIT: i64 = 5;

/// Upper bound for the recent-sales listing.
pub const MAX_RECENT_SALES_LIMIT: i64 = 100;

/// Largest stock level or line quantity accepted.
pub const MAX_QUANTITY: i64 = 10_000_000;

/// Largest single amount (price or sale total) accepted, in minor units.
///
/// `MAX_QUANTITY × MAX_AMOUNT_MINOR` still fits in an `i64`, so one row's
/// stock value never overflows.
pub const MAX_AMOUNT_MINOR: i64 = 100_000_000_000;
