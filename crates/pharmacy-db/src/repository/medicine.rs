//! # Medicine Repository
//!
//! Database operations for the medicine inventory ledger.
//!
//! ## Key Operations
//! - Case-insensitive search over brand and generic names
//! - CRUD with validation and status derivation on every write
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    create() / update()                                  │
//! │                                                                         │
//! │  MedicineInput (no status field)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ledger::validate_medicine ──✗──► DbError::Rejected(Validation)        │
//! │       │ ✓                                                               │
//! │       ▼                                                                 │
//! │  ledger::derive_status(quantity, expiry_date, today)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT / UPDATE ... RETURNING *                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money columns are stored as `*_minor` integers and aliased back to the
//! struct field names in every SELECT.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use pharmacy_core::ledger::validate_medicine;
use pharmacy_core::{CoreError, Medicine, MedicineFilter, MedicineInput};

/// Column list shared by every query returning a [`Medicine`].
pub(crate) const MEDICINE_COLUMNS: &str = "\
    id, medicine_name, generic_name, category, batch_no, expiry_date, quantity, \
    cost_price_minor AS cost_price, mrp_minor AS mrp, \
    supplier, status, created_at, updated_at";

/// Repository for medicine database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.medicines();
///
/// let page = repo.list(&MedicineFilter { search: Some("para".into()), skip: 0, limit: 20 }).await?;
/// let medicine = repo.get(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: SqlitePool,
}

impl MedicineRepository {
    /// Creates a new MedicineRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MedicineRepository { pool }
    }

    /// Lists medicines, optionally filtered by a search term.
    ///
    /// ## Matching
    /// The term matches anywhere in `medicine_name` or `generic_name`,
    /// ignoring case. `%` and `_` in the term are matched literally.
    ///
    /// Results are ordered by id and paged with `skip` / `limit`. An empty
    /// store or a term with no matches yields an empty list.
    pub async fn list(&self, filter: &MedicineFilter) -> DbResult<Vec<Medicine>> {
        debug!(
            search = ?filter.search,
            skip = filter.skip,
            limit = filter.limit,
            "Listing medicines"
        );

        let pattern = filter.search.as_deref().map(like_pattern);

        let sql = format!(
            r#"
            SELECT {MEDICINE_COLUMNS}
            FROM medicines
            WHERE ?1 IS NULL
               OR LOWER(medicine_name) LIKE ?1 ESCAPE '\'
               OR LOWER(generic_name) LIKE ?1 ESCAPE '\'
            ORDER BY id
            LIMIT ?2 OFFSET ?3
            "#
        );

        let medicines = sqlx::query_as::<_, Medicine>(&sql)
            .bind(pattern)
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&self.pool)
            .await?;

        Ok(medicines)
    }

    /// Gets a medicine by ID, if it exists.
    pub async fn find(&self, id: i64) -> DbResult<Option<Medicine>> {
        let sql = format!("SELECT {MEDICINE_COLUMNS} FROM medicines WHERE id = ?1");

        let medicine = sqlx::query_as::<_, Medicine>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(medicine)
    }

    /// Gets a medicine by ID.
    ///
    /// ## Errors
    /// `DbError::Rejected(CoreError::MedicineNotFound)` when absent.
    pub async fn get(&self, id: i64) -> DbResult<Medicine> {
        self.find(id)
            .await?
            .ok_or(DbError::Rejected(CoreError::MedicineNotFound(id)))
    }

    /// Adds a medicine to the ledger.
    ///
    /// Validates the input, derives the status for today (UTC) and returns
    /// the stored row with its assigned id.
    pub async fn create(&self, input: &MedicineInput) -> DbResult<Medicine> {
        let mut conn = self.pool.acquire().await?;
        insert_medicine(&mut conn, input, Utc::now()).await
    }

    /// Overwrites every writable field of a medicine and recomputes its status.
    ///
    /// A missing id is reported before any validation failure.
    pub async fn update(&self, id: i64, input: &MedicineInput) -> DbResult<Medicine> {
        self.get(id).await?;
        validate_medicine(input)?;

        let now = Utc::now();
        let status = input.status_on(now.date_naive());

        debug!(id, status = %status, "Updating medicine");

        let sql = format!(
            r#"
            UPDATE medicines SET
                medicine_name = ?2,
                generic_name = ?3,
                category = ?4,
                batch_no = ?5,
                expiry_date = ?6,
                quantity = ?7,
                cost_price_minor = ?8,
                mrp_minor = ?9,
                supplier = ?10,
                status = ?11,
                updated_at = ?12
            WHERE id = ?1
            RETURNING {MEDICINE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Medicine>(&sql)
            .bind(id)
            .bind(&input.medicine_name)
            .bind(&input.generic_name)
            .bind(&input.category)
            .bind(&input.batch_no)
            .bind(input.expiry_date)
            .bind(input.quantity)
            .bind(input.cost_price)
            .bind(input.mrp)
            .bind(&input.supplier)
            .bind(status)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::Rejected(CoreError::MedicineNotFound(id)))
    }

    /// Removes a medicine from the ledger.
    ///
    /// Sale history is untouched: line snapshots keep the id and name.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting medicine");

        let result = sqlx::query("DELETE FROM medicines WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::Rejected(CoreError::MedicineNotFound(id)));
        }

        Ok(())
    }

    /// Counts medicines in the ledger.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Builds a lowercase `%term%` LIKE pattern with `\` escaping.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Validates and inserts one medicine on a caller-supplied connection, so a
/// batch of inserts can share a transaction.
pub(crate) async fn insert_medicine(
    conn: &mut SqliteConnection,
    input: &MedicineInput,
    now: DateTime<Utc>,
) -> DbResult<Medicine> {
    validate_medicine(input)?;

    let status = input.status_on(now.date_naive());

    debug!(
        medicine_name = %input.medicine_name,
        status = %status,
        "Creating medicine"
    );

    let sql = format!(
        r#"
        INSERT INTO medicines (
            medicine_name, generic_name, category, batch_no,
            expiry_date, quantity, cost_price_minor, mrp_minor,
            supplier, status, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
        RETURNING {MEDICINE_COLUMNS}
        "#
    );

    let medicine = sqlx::query_as::<_, Medicine>(&sql)
        .bind(&input.medicine_name)
        .bind(&input.generic_name)
        .bind(&input.category)
        .bind(&input.batch_no)
        .bind(input.expiry_date)
        .bind(input.quantity)
        .bind(input.cost_price)
        .bind(input.mrp)
        .bind(&input.supplier)
        .bind(status)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

    debug!(id = medicine.id, "Medicine created");

    Ok(medicine)
}
