//! # Wire Types
//!
//! JSON request and response bodies for the dashboard.
//!
//! ## Why DTOs?
//! The domain keeps money as integer minor units; the dashboard sends and
//! expects decimal numbers (`2.5`). Conversion happens here, once, in both
//! directions:
//!
//! ```text
//! MedicineRequest { cost_price: 2.5 }  ──► MedicineInput { cost_price: Money(250) }
//! Medicine { mrp: Money(500) }         ──► MedicineResponse { mrp: 5.0 }
//! ```
//!
//! Field names follow the dashboard's existing contract (snake_case).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pharmacy_core::{
    DashboardStats, Medicine, MedicineInput, MedicineStatus, Money, NewSale, Sale, SaleDetail,
    SaleItem, SaleLineItem, SaleStatus, ValidationError,
};

fn money(field: &str, amount: f64) -> Result<Money, ValidationError> {
    Money::from_major_f64(amount).ok_or_else(|| ValidationError::MustBePositive {
        field: field.to_string(),
    })
}

// =============================================================================
// Inventory
// =============================================================================

/// Body of `POST` / `PUT /api/inventory/medicines`.
///
/// There is no `status` field; any `status` sent by a client is ignored.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct MedicineRequest {
    pub medicine_name: String,
    pub generic_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub batch_no: String,
    #[ts(type = "string")]
    pub expiry_date: NaiveDate,
    #[serde(default)]
    pub quantity: i64,
    pub cost_price: f64,
    pub mrp: f64,
    #[serde(default)]
    pub supplier: String,
}

impl TryFrom<MedicineRequest> for MedicineInput {
    type Error = ValidationError;

    fn try_from(req: MedicineRequest) -> Result<Self, Self::Error> {
        Ok(MedicineInput {
            cost_price: money("cost_price", req.cost_price)?,
            mrp: money("mrp", req.mrp)?,
            medicine_name: req.medicine_name.trim().to_string(),
            generic_name: req.generic_name.trim().to_string(),
            category: req.category,
            batch_no: req.batch_no,
            expiry_date: req.expiry_date,
            quantity: req.quantity,
            supplier: req.supplier,
        })
    }
}

/// A medicine as shown in the inventory table.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct MedicineResponse {
    pub id: i64,
    pub medicine_name: String,
    pub generic_name: String,
    pub category: String,
    pub batch_no: String,
    #[ts(type = "string")]
    pub expiry_date: NaiveDate,
    pub quantity: i64,
    pub cost_price: f64,
    pub mrp: f64,
    pub supplier: String,
    #[ts(type = "\"Active\" | \"Low Stock\" | \"Out of Stock\" | \"Expired\"")]
    pub status: MedicineStatus,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
    #[ts(type = "string")]
    pub updated_at: DateTime<Utc>,
}

impl From<Medicine> for MedicineResponse {
    fn from(m: Medicine) -> Self {
        MedicineResponse {
            id: m.id,
            medicine_name: m.medicine_name,
            generic_name: m.generic_name,
            category: m.category,
            batch_no: m.batch_no,
            expiry_date: m.expiry_date,
            quantity: m.quantity,
            cost_price: m.cost_price.to_major_f64(),
            mrp: m.mrp.to_major_f64(),
            supplier: m.supplier,
            status: m.status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Query string of `GET /api/inventory/medicines`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicineQuery {
    pub search: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

// =============================================================================
// Sales
// =============================================================================

/// One requested line of a sale.
#[derive(Debug, Clone, Copy, Deserialize, TS)]
#[ts(export)]
pub struct SaleLineRequest {
    pub medicine_id: i64,
    pub quantity: i64,
}

/// Body of `POST /api/sales/create-sale`.
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct SaleRequest {
    pub invoice_no: String,
    pub customer_name: String,
    pub items_count: i64,
    pub total_amount: f64,
    pub payment_method: String,
    #[serde(default)]
    pub items: Vec<SaleLineRequest>,
}

impl TryFrom<SaleRequest> for NewSale {
    type Error = ValidationError;

    fn try_from(req: SaleRequest) -> Result<Self, Self::Error> {
        Ok(NewSale {
            total_amount: money("total_amount", req.total_amount)?,
            invoice_no: req.invoice_no.trim().to_string(),
            customer_name: req.customer_name.trim().to_string(),
            items_count: req.items_count,
            payment_method: req.payment_method,
            items: req
                .items
                .into_iter()
                .map(|line| SaleLineItem {
                    medicine_id: line.medicine_id,
                    quantity: line.quantity,
                })
                .collect(),
        })
    }
}

/// A recorded sale.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SaleResponse {
    pub id: i64,
    pub invoice_no: String,
    pub customer_name: String,
    pub items_count: i64,
    pub total_amount: f64,
    pub payment_method: String,
    #[ts(type = "string")]
    pub date: DateTime<Utc>,
    #[ts(type = "\"Completed\"")]
    pub status: SaleStatus,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

impl From<Sale> for SaleResponse {
    fn from(s: Sale) -> Self {
        SaleResponse {
            id: s.id,
            invoice_no: s.invoice_no,
            customer_name: s.customer_name,
            items_count: s.items_count,
            total_amount: s.total_amount.to_major_f64(),
            payment_method: s.payment_method,
            date: s.date,
            status: s.status,
            created_at: s.created_at,
        }
    }
}

/// A sold line as recorded at the time of sale.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SaleItemResponse {
    pub id: i64,
    pub medicine_id: i64,
    pub medicine_name: String,
    pub quantity: i64,
}

impl From<SaleItem> for SaleItemResponse {
    fn from(item: SaleItem) -> Self {
        SaleItemResponse {
            id: item.id,
            medicine_id: item.medicine_id,
            medicine_name: item.medicine_name,
            quantity: item.quantity,
        }
    }
}

/// A sale with its line snapshots.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct SaleDetailResponse {
    #[serde(flatten)]
    pub sale: SaleResponse,
    pub items: Vec<SaleItemResponse>,
}

impl From<SaleDetail> for SaleDetailResponse {
    fn from(detail: SaleDetail) -> Self {
        SaleDetailResponse {
            sale: detail.sale.into(),
            items: detail.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Query string of `GET /api/dashboard/recent-sales`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecentSalesQuery {
    pub limit: Option<i64>,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Dashboard summary cards.
///
/// `purchase_orders` carries the inventory value at cost; the name is kept
/// for the dashboard's existing card.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct DashboardStatsResponse {
    pub todays_sales: f64,
    pub items_sold_today: i64,
    pub low_stock_items: i64,
    pub purchase_orders: f64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        DashboardStatsResponse {
            todays_sales: stats.todays_sales.to_major_f64(),
            items_sold_today: stats.items_sold_today,
            low_stock_items: stats.low_stock_items,
            purchase_orders: stats.inventory_value.to_major_f64(),
        }
    }
}
