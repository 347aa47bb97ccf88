//! # Sale Repository
//!
//! The sale transaction processor plus read access to recorded sales.
//!
//! ## Sale Processing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create_sale(NewSale)                                 │
//! │                                                                         │
//! │  1. validate_sale_header      ──✗──► Validation (nothing opened)       │
//! │                                                                         │
//! │  BEGIN ─────────────────────────────────────────────────────────────┐  │
//! │  2. invoice_no unused?        ──✗──► DuplicateInvoice               │  │
//! │  3. merge_line_items          ──✗──► Validation (empty / bad qty)   │  │
//! │  4. per line: exists?         ──✗──► MedicineNotFound               │  │
//! │              enough stock?    ──✗──► InsufficientStock              │  │
//! │  ── nothing written above this line ──                              │  │
//! │  5. INSERT sale (Completed, date = now)                             │  │
//! │  6. per line:                                                       │  │
//! │       UPDATE quantity = quantity - n WHERE quantity >= n            │  │
//! │       UPDATE status = derive_status(...)                            │  │
//! │       INSERT sale_items snapshot                                    │  │
//! │  COMMIT ────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Any error before COMMIT drops the transaction → ROLLBACK              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The decrement is conditional, so a sale that lost a race for the last
//! units affects zero rows and is rejected as insufficient stock instead of
//! driving the quantity negative. The unique index on `invoice_no` turns a
//! racing duplicate into a conflict.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use pharmacy_core::ledger::derive_status;
use pharmacy_core::validation::{merge_line_items, validate_sale_header};
use pharmacy_core::{CoreError, NewSale, Sale, SaleDetail, SaleItem, SaleLineItem, SaleStatus};

/// Column list shared by every query returning a [`Sale`].
const SALE_COLUMNS: &str = "\
    id, invoice_no, customer_name, items_count, \
    total_amount_minor AS total_amount, \
    payment_method, date, status, created_at";

/// A line item checked against the ledger, ready to apply.
#[derive(Debug)]
struct CheckedLine {
    medicine_id: i64,
    medicine_name: String,
    quantity: i64,
}

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a sale and decrements stock atomically.
    ///
    /// ## Returns
    /// The persisted sale with its id, `date` and `Completed` status.
    ///
    /// ## Errors
    /// - `Rejected(Validation)` for a bad header or line items
    /// - `Rejected(DuplicateInvoice)` when the invoice number is taken
    /// - `Rejected(MedicineNotFound)` naming the first unknown id
    /// - `Rejected(InsufficientStock)` naming medicine, available, requested
    /// - `TransactionFailed` for anything unexpected; nothing is committed
    pub async fn create_sale(&self, sale: &NewSale) -> DbResult<Sale> {
        validate_sale_header(sale)?;

        debug!(
            invoice_no = %sale.invoice_no,
            lines = sale.items.len(),
            "Processing sale"
        );

        // Take the write lock up front: a deferred transaction that reads
        // first cannot wait for the lock when it upgrades, it fails at once.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;

        let recorded = apply_sale(&mut tx, sale, Utc::now())
            .await
            .map_err(|err| classify_failure(err, &sale.invoice_no))?;

        tx.commit().await.map_err(|e| DbError::from(e).in_transaction())?;

        info!(
            id = recorded.id,
            invoice_no = %recorded.invoice_no,
            total = %recorded.total_amount,
            "Sale completed"
        );

        Ok(recorded)
    }

    /// Checks whether an invoice number has been used.
    pub async fn invoice_exists(&self, invoice_no: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM sales WHERE invoice_no = ?1)")
                .bind(invoice_no)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Gets a sale with its line snapshots.
    pub async fn get(&self, id: i64) -> DbResult<SaleDetail> {
        let sql = format!("SELECT {SALE_COLUMNS} FROM sales WHERE id = ?1");

        let sale = sqlx::query_as::<_, Sale>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::Rejected(CoreError::SaleNotFound(id)))?;

        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, medicine_id, medicine_name, quantity, created_at
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(SaleDetail { sale, items })
    }

    /// Most recent sales, newest first.
    pub async fn recent(&self, limit: i64) -> DbResult<Vec<Sale>> {
        let sql = format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY date DESC, id DESC LIMIT ?1"
        );

        let sales = sqlx::query_as::<_, Sale>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(sales)
    }

    /// Inserts a completed sale header without touching stock.
    ///
    /// Used for historical rows (demo seeding); live sales go through
    /// [`SaleRepository::create_sale`].
    pub async fn insert_record(&self, sale: &NewSale, date: DateTime<Utc>) -> DbResult<Sale> {
        let mut conn = self.pool.acquire().await?;
        record_sale(&mut conn, sale, date).await
    }
}

// =============================================================================
// Transaction Steps
// =============================================================================

/// Runs the checks and writes of one sale inside `tx`.
async fn apply_sale(
    tx: &mut Transaction<'_, Sqlite>,
    sale: &NewSale,
    now: DateTime<Utc>,
) -> DbResult<Sale> {
    let taken: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM sales WHERE invoice_no = ?1)")
            .bind(&sale.invoice_no)
            .fetch_one(&mut **tx)
            .await?;

    if taken {
        return Err(CoreError::DuplicateInvoice(sale.invoice_no.clone()).into());
    }

    let lines = merge_line_items(&sale.items)?;
    let checked = check_stock(tx, &lines).await?;

    let recorded = insert_sale(&mut **tx, sale, now).await?;
    let today = now.date_naive();

    for line in &checked {
        let (remaining, expiry_date) = match sqlx::query_as::<_, (i64, NaiveDate)>(
            r#"
            UPDATE medicines
            SET quantity = quantity - ?1, updated_at = ?2
            WHERE id = ?3 AND quantity >= ?1
            RETURNING quantity, expiry_date
            "#,
        )
        .bind(line.quantity)
        .bind(now)
        .bind(line.medicine_id)
        .fetch_optional(&mut **tx)
        .await?
        {
            Some(row) => row,
            None => {
                let available: i64 =
                    sqlx::query_scalar("SELECT quantity FROM medicines WHERE id = ?1")
                        .bind(line.medicine_id)
                        .fetch_optional(&mut **tx)
                        .await?
                        .unwrap_or(0);

                warn!(
                    medicine_id = line.medicine_id,
                    available,
                    requested = line.quantity,
                    "Stock changed during sale"
                );

                return Err(CoreError::InsufficientStock {
                    medicine: line.medicine_name.clone(),
                    available,
                    requested: line.quantity,
                }
                .into());
            }
        };

        let status = derive_status(remaining, expiry_date, today);

        sqlx::query("UPDATE medicines SET status = ?1 WHERE id = ?2")
            .bind(status)
            .bind(line.medicine_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO sale_items (sale_id, medicine_id, medicine_name, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(recorded.id)
        .bind(line.medicine_id)
        .bind(&line.medicine_name)
        .bind(line.quantity)
        .bind(now)
        .execute(&mut **tx)
        .await?;

        debug!(
            medicine_id = line.medicine_id,
            remaining,
            status = %status,
            "Stock decremented"
        );
    }

    Ok(recorded)
}

/// Verifies every merged line against current stock, in request order.
async fn check_stock(
    tx: &mut Transaction<'_, Sqlite>,
    lines: &[SaleLineItem],
) -> DbResult<Vec<CheckedLine>> {
    let mut checked = Vec::with_capacity(lines.len());

    for line in lines {
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT medicine_name, quantity FROM medicines WHERE id = ?1")
                .bind(line.medicine_id)
                .fetch_optional(&mut **tx)
                .await?;

        let Some((medicine_name, available)) = row else {
            return Err(CoreError::MedicineNotFound(line.medicine_id).into());
        };

        if available < line.quantity {
            return Err(CoreError::InsufficientStock {
                medicine: medicine_name,
                available,
                requested: line.quantity,
            }
            .into());
        }

        checked.push(CheckedLine {
            medicine_id: line.medicine_id,
            medicine_name,
            quantity: line.quantity,
        });
    }

    Ok(checked)
}

/// Validates and inserts a sale header on a caller-supplied connection.
pub(crate) async fn record_sale(
    conn: &mut sqlx::SqliteConnection,
    sale: &NewSale,
    date: DateTime<Utc>,
) -> DbResult<Sale> {
    validate_sale_header(sale)?;

    insert_sale(conn, sale, date).await.map_err(|err| match err {
        DbError::UniqueViolation { .. } => {
            DbError::Rejected(CoreError::DuplicateInvoice(sale.invoice_no.clone()))
        }
        other => other,
    })
}

/// Inserts the sale header and returns the stored row.
async fn insert_sale(
    conn: &mut sqlx::SqliteConnection,
    sale: &NewSale,
    date: DateTime<Utc>,
) -> DbResult<Sale> {
    let sql = format!(
        r#"
        INSERT INTO sales (
            invoice_no, customer_name, items_count, total_amount_minor,
            payment_method, date, status, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        RETURNING {SALE_COLUMNS}
        "#
    );

    let recorded = sqlx::query_as::<_, Sale>(&sql)
        .bind(&sale.invoice_no)
        .bind(&sale.customer_name)
        .bind(sale.items_count)
        .bind(sale.total_amount)
        .bind(&sale.payment_method)
        .bind(date)
        .bind(SaleStatus::Completed)
        .bind(Utc::now())
        .fetch_one(conn)
        .await?;

    Ok(recorded)
}

/// Maps a failure inside the sale transaction to what the caller sees.
fn classify_failure(err: DbError, invoice_no: &str) -> DbError {
    match err {
        DbError::UniqueViolation { .. } => {
            DbError::Rejected(CoreError::DuplicateInvoice(invoice_no.to_string()))
        }
        other => other.in_transaction(),
    }
}
