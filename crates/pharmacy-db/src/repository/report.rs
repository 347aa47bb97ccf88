//! # Report Repository
//!
//! Read-only dashboard aggregation over the ledger and sale history.

use chrono::{Days, NaiveDate, NaiveTime};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use pharmacy_core::{DashboardStats, MedicineStatus, Money};

/// Repository for dashboard reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Computes the dashboard figures for `today` (a UTC calendar day).
    ///
    /// ## Figures
    /// - `todays_sales`: Σ `total_amount` of sales dated `today`
    /// - `items_sold_today`: Σ `items_count` of the same sales
    /// - `low_stock_items`: medicines whose stored status is "Low Stock"
    /// - `inventory_value`: Σ `quantity × cost_price` over all medicines
    ///
    /// Every sum is 0 on an empty set.
    pub async fn dashboard_stats(&self, today: NaiveDate) -> DbResult<DashboardStats> {
        let start = today.and_time(NaiveTime::MIN).and_utc();
        let end = today
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DbError::Internal(format!("date out of range: {today}")))?
            .and_time(NaiveTime::MIN)
            .and_utc();

        debug!(%today, "Computing dashboard stats");

        // Sale dates are RFC 3339 text in UTC, so string order is time order
        let (todays_sales, items_sold_today): (Money, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(total_amount_minor), 0),
                COALESCE(SUM(items_count), 0)
            FROM sales
            WHERE date >= ?1 AND date < ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        // TOTAL() sums as REAL and never raises on integer overflow; the
        // `as` cast saturates at i64::MAX.
        let (low_stock_items, stock_value): (i64, f64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN status = ?1 THEN 1 ELSE 0 END), 0),
                TOTAL(quantity * cost_price_minor)
            FROM medicines
            "#,
        )
        .bind(MedicineStatus::LowStock)
        .fetch_one(&self.pool)
        .await?;
        let inventory_value = Money::from_minor(stock_value.round() as i64);

        Ok(DashboardStats {
            todays_sales,
            items_sold_today,
            low_stock_items,
            inventory_value,
        })
    }
}
