//! # Domain Types
//!
//! Core domain types used throughout the pharmacy POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Medicine     │   │      Sale       │   │    SaleItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  sale_id        │       │
//! │  │  medicine_name  │   │  invoice_no     │   │  medicine_id    │       │
//! │  │  expiry_date    │   │  total_amount   │   │  name snapshot  │       │
//! │  │  quantity       │   │  items_count    │   │  quantity       │       │
//! │  │  status (derived)  │  status         │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                              │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ MedicineStatus  │   │   SaleStatus    │   │ DashboardStats  │       │
//! │  │  Active         │   │  Completed      │   │  todays_sales   │       │
//! │  │  Low Stock      │   └─────────────────┘   │  inventory_value│       │
//! │  │  Out of Stock   │                         └─────────────────┘       │
//! │  │  Expired        │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Input vs Record
//! Inputs (`MedicineInput`, `NewSale`) never carry a status or an id. Both are
//! assigned by the write path, so callers cannot set them directly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Medicine Status
// =============================================================================

/// Stock/expiry status of a medicine.
///
/// Always computed by [`crate::ledger::derive_status`]; stored alongside the
/// row so reports can filter on the last computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum MedicineStatus {
    #[serde(rename = "Active")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Active"))]
    Active,

    #[serde(rename = "Low Stock")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Low Stock"))]
    LowStock,

    #[serde(rename = "Out of Stock")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Out of Stock"))]
    OutOfStock,

    #[serde(rename = "Expired")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "Expired"))]
    Expired,
}

impl MedicineStatus {
    /// The label stored in the database and shown in the UI.
    pub const fn as_str(&self) -> &'static str {
        match self {
            MedicineStatus::Active => "Active",
            MedicineStatus::LowStock => "Low Stock",
            MedicineStatus::OutOfStock => "Out of Stock",
            MedicineStatus::Expired => "Expired",
        }
    }
}

impl fmt::Display for MedicineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Medicine
// =============================================================================

/// A ledger entry: one batch of one medicine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Medicine {
    pub id: i64,

    /// Brand/display name.
    pub medicine_name: String,

    /// Active ingredient name.
    pub generic_name: String,

    pub category: String,

    pub batch_no: String,

    pub expiry_date: NaiveDate,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Purchase price per unit.
    pub cost_price: Money,

    /// Maximum retail price per unit.
    pub mrp: Money,

    pub supplier: String,

    /// Derived from (quantity, expiry_date) at the last write.
    pub status: MedicineStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Writable medicine fields, used by both create and update.
///
/// Has no `status` field: status is derived on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineInput {
    pub medicine_name: String,
    pub generic_name: String,
    pub category: String,
    pub batch_no: String,
    pub expiry_date: NaiveDate,
    pub quantity: i64,
    pub cost_price: Money,
    pub mrp: Money,
    pub supplier: String,
}

/// Listing parameters for the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicineFilter {
    /// Case-insensitive substring matched against name or generic name.
    pub search: Option<String>,
    pub skip: i64,
    pub limit: i64,
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale. Creation only ever produces `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
pub enum SaleStatus {
    #[default]
    Completed,
}

impl SaleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Completed => "Completed",
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    pub invoice_no: String,
    pub customer_name: String,
    /// Caller-reported number of items on the invoice.
    pub items_count: i64,
    pub total_amount: Money,
    pub payment_method: String,
    /// When the sale happened; drives "today" in reports.
    pub date: DateTime<Utc>,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
}

/// One requested line of a sale: which medicine and how many units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleLineItem {
    pub medicine_id: i64,
    pub quantity: i64,
}

/// A sale request, before any validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub invoice_no: String,
    pub customer_name: String,
    pub items_count: i64,
    pub total_amount: Money,
    pub payment_method: String,
    pub items: Vec<SaleLineItem>,
}

// =============================================================================
// Sale Item
// =============================================================================

/// A line of a completed sale, frozen at the time of sale.
///
/// `medicine_id` is kept without a foreign key: medicines may be deleted
/// later and the sale history must survive that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub medicine_id: i64,
    /// Medicine name at time of sale (frozen).
    pub medicine_name: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// A sale together with its persisted line snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDetail {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

// =============================================================================
// Reporting
// =============================================================================

/// Figures shown on the dashboard for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    /// Σ total_amount of today's sales.
    pub todays_sales: Money,
    /// Σ items_count of today's sales.
    pub items_sold_today: i64,
    /// Medicines whose stored status is "Low Stock".
    pub low_stock_items: i64,
    /// Σ quantity × cost_price over the whole ledger.
    pub inventory_value: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
