//! # Medicine Ledger Rules
//!
//! The status derivation rule and record-level validation for medicines.
//!
//! ## Status Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  derive_status(quantity, expiry_date, today)                            │
//! │                                                                         │
//! │  expiry_date < today ?  ──yes──► Expired                                │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  quantity == 0 ?        ──yes──► Out of Stock                           │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  quantity < 20 ?        ──yes──► Low Stock                              │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │  Active                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every write path that touches `quantity` or `expiry_date` calls
//! [`derive_status`]: ledger create/update and the sale decrement.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{MedicineInput, MedicineStatus};
use crate::validation::{validate_at_most, validate_name, validate_optional_text, ValidationResult};
use crate::{LOW_STOCK_THRESHOLD, MAX_AMOUNT_MINOR, MAX_QUANTITY};

/// Computes a medicine's status from its stock and expiry.
///
/// A medicine expiring today is still sellable; it becomes `Expired` the day
/// after.
///
/// ```rust
/// use chrono::NaiveDate;
/// use pharmacy_core::ledger::derive_status;
/// use pharmacy_core::MedicineStatus;
///
/// let today = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
/// let yesterday = NaiveDate::from_ymd_opt(2026, 1, 9).unwrap();
///
/// // Expiry wins over every stock level
/// assert_eq!(derive_status(0, yesterday, today), MedicineStatus::Expired);
/// assert_eq!(derive_status(500, today, today), MedicineStatus::Active);
/// ```
pub fn derive_status(quantity: i64, expiry_date: NaiveDate, today: NaiveDate) -> MedicineStatus {
    if expiry_date < today {
        MedicineStatus::Expired
    } else if quantity == 0 {
        MedicineStatus::OutOfStock
    } else if quantity < LOW_STOCK_THRESHOLD {
        MedicineStatus::LowStock
    } else {
        MedicineStatus::Active
    }
}

/// Validates the writable fields of a medicine.
///
/// ## Rules
/// - `medicine_name` and `generic_name` are required
/// - `cost_price` and `mrp` must both be > 0
/// - `mrp` must be ≥ `cost_price`
/// - `quantity` must not be negative
/// - `quantity`, `cost_price` and `mrp` stay within [`MAX_QUANTITY`] and
///   [`MAX_AMOUNT_MINOR`], so stock value sums cannot overflow one row
pub fn validate_medicine(input: &MedicineInput) -> ValidationResult<()> {
    validate_name("medicine_name", &input.medicine_name)?;
    validate_name("generic_name", &input.generic_name)?;
    validate_optional_text("category", &input.category)?;
    validate_optional_text("batch_no", &input.batch_no)?;
    validate_optional_text("supplier", &input.supplier)?;

    if !input.cost_price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "cost_price".to_string(),
        });
    }

    if !input.mrp.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "mrp".to_string(),
        });
    }

    if input.mrp < input.cost_price {
        return Err(ValidationError::MrpBelowCost);
    }

    if input.quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    validate_at_most("quantity", input.quantity, MAX_QUANTITY)?;
    validate_at_most("cost_price", input.cost_price.minor(), MAX_AMOUNT_MINOR)?;
    validate_at_most("mrp", input.mrp.minor(), MAX_AMOUNT_MINOR)?;

    Ok(())
}

impl MedicineInput {
    /// Status this input would get if written on `today`.
    #[inline]
    pub fn status_on(&self, today: NaiveDate) -> MedicineStatus {
        derive_status(self.quantity, self.expiry_date, today)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
