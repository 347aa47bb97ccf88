//! # Validation Module
//!
//! Input validation utilities for the pharmacy POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP (pharmacy-api)                                          │
//! │  ├── JSON shape and types (deserialization)                            │
//! │  └── Decimal → Money conversion                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + ledger                                         │
//! │  ├── Required fields, positive amounts, MRP ≥ cost                     │
//! │  └── Sale header and line items                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE(invoice_no)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sale Validation Order
//! The sale processor runs these checks in a fixed order and stops at the
//! first failure:
//!
//! 1. [`validate_sale_header`]: invoice number, customer name, total amount
//! 2. invoice uniqueness (needs the database, lives in pharmacy-db)
//! 3. [`merge_line_items`]: at least one line, positive quantities
//! 4. stock checks per merged line (needs the database)

use crate::error::ValidationError;
use crate::types::{MedicineFilter, NewSale, SaleLineItem};
use crate::{
    DEFAULT_PAGE_LIMIT, DEFAULT_RECENT_SALES_LIMIT, MAX_AMOUNT_MINOR, MAX_PAGE_LIMIT,
    MAX_QUANTITY, MAX_RECENT_SALES_LIMIT,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects `value > max`.
pub fn validate_at_most(field: &str, value: i64, max: i64) -> ValidationResult<()> {
    if value > max {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Longest accepted name-like field.
const MAX_NAME_LEN: usize = 200;

/// Longest accepted search term.
const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required, non-blank name field.
///
/// ```rust
/// use pharmacy_core::validation::validate_name;
///
/// assert!(validate_name("medicine_name", "Paracetamol").is_ok());
/// assert!(validate_name("medicine_name", "  ").is_err());
/// ```
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a free-text field that may be empty.
pub fn validate_optional_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Normalizes a search term.
///
/// ## Returns
/// `None` when the term is missing or blank (list everything), otherwise the
/// trimmed term.
pub fn normalize_search(search: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    if term.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "search".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(Some(term.to_string()))
}

// =============================================================================
// Paging
// =============================================================================

/// Builds a [`MedicineFilter`] from raw query parameters.
///
/// Missing values fall back to `skip = 0` and `limit = 100`; a negative skip
/// becomes 0 and the limit is clamped to `1..=500`.
pub fn medicine_filter(
    search: Option<&str>,
    skip: Option<i64>,
    limit: Option<i64>,
) -> ValidationResult<MedicineFilter> {
    Ok(MedicineFilter {
        search: normalize_search(search)?,
        skip: skip.unwrap_or(0).max(0),
        limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
    })
}

/// Clamps the dashboard's recent-sales limit to `1..=100` (default 5).
pub fn recent_sales_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENT_SALES_LIMIT)
        .clamp(1, MAX_RECENT_SALES_LIMIT)
}

// =============================================================================
// Sale Validators
// =============================================================================

/// Validates the header of a sale request.
///
/// ## Rules (in order)
/// 1. `invoice_no` and `customer_name` are non-blank
/// 2. `total_amount` is > 0 and at most [`MAX_AMOUNT_MINOR`]
/// 3. `items_count` is at most [`MAX_QUANTITY`]
pub fn validate_sale_header(sale: &NewSale) -> ValidationResult<()> {
    validate_name("invoice_no", &sale.invoice_no)?;
    validate_name("customer_name", &sale.customer_name)?;

    if !sale.total_amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "total_amount".to_string(),
        });
    }
    validate_at_most("total_amount", sale.total_amount.minor(), MAX_AMOUNT_MINOR)?;
    validate_at_most("items_count", sale.items_count, MAX_QUANTITY)?;

    Ok(())
}

/// Validates sale line items and merges repeated medicine ids.
///
/// ## Rules
/// - At least one line item
/// - Every requested quantity is > 0
/// - The merged quantity per medicine is at most [`MAX_QUANTITY`]
///
/// ## Merging
/// ```text
/// [ {id: 1, qty: 3}, {id: 2, qty: 1}, {id: 1, qty: 4} ]
///      │
///      ▼
/// [ {id: 1, qty: 7}, {id: 2, qty: 1} ]   (first-seen order kept)
/// ```
/// The stock check then sees the full demand for each medicine, so two lines
/// cannot jointly overdraw one row.
pub fn merge_line_items(items: &[SaleLineItem]) -> ValidationResult<Vec<SaleLineItem>> {
    if items.is_empty() {
        return Err(ValidationError::EmptySale);
    }

    let mut merged: Vec<SaleLineItem> = Vec::with_capacity(items.len());

    for item in items {
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }

        let total = match merged.iter_mut().find(|m| m.medicine_id == item.medicine_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                existing.quantity
            }
            None => {
                merged.push(*item);
                item.quantity
            }
        };
        validate_at_most("quantity", total, MAX_QUANTITY)?;
    }

    Ok(merged)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn sale() -> NewSale {
        NewSale {
            invoice_no: "INV100".to_string(),
            customer_name: "Jane Smith".to_string(),
            items_count: 2,
            total_amount: Money::from_minor(4550),
            payment_method: "Cash".to_string(),
            items: vec![SaleLineItem {
                medicine_id: 1,
                quantity: 2,
            }],
        }
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("medicine_name", "Ibuprofen").is_ok());
        assert!(validate_name("medicine_name", "").is_err());
        assert!(validate_name("medicine_name", &"A".repeat(201)).is_err());
    }

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(None).unwrap(), None);
        assert_eq!(normalize_search(Some("   ")).unwrap(), None);
        assert_eq!(
            normalize_search(Some("  para ")).unwrap(),
            Some("para".to_string())
        );
        assert!(normalize_search(Some(&"x".repeat(101))).is_err());
    }

    #[test]
    fn test_medicine_filter_defaults_and_clamps() {
        let filter = medicine_filter(None, None, None).unwrap();
        assert_eq!(filter.skip, 0);
        assert_eq!(filter.limit, 100);

        let filter = medicine_filter(Some("asp"), Some(-5), Some(10_000)).unwrap();
        assert_eq!(filter.search.as_deref(), Some("asp"));
        assert_eq!(filter.skip, 0);
        assert_eq!(filter.limit, 500);

        assert_eq!(medicine_filter(None, None, Some(0)).unwrap().limit, 1);
    }

    #[test]
    fn test_recent_sales_limit() {
        assert_eq!(recent_sales_limit(None), 5);
        assert_eq!(recent_sales_limit(Some(0)), 1);
        assert_eq!(recent_sales_limit(Some(10)), 10);
        assert_eq!(recent_sales_limit(Some(1000)), 100);
    }

    #[test]
    fn test_sale_header_checks_run_in_order() {
        let mut bad = sale();
        bad.invoice_no = " ".to_string();
        bad.total_amount = Money::zero();
        assert!(matches!(
            validate_sale_header(&bad),
            Err(ValidationError::Required { ref field }) if field == "invoice_no"
        ));

        let mut bad = sale();
        bad.customer_name = String::new();
        assert!(matches!(
            validate_sale_header(&bad),
            Err(ValidationError::Required { ref field }) if field == "customer_name"
        ));

        let mut bad = sale();
        bad.total_amount = Money::from_minor(-1);
        assert!(matches!(
            validate_sale_header(&bad),
            Err(ValidationError::MustBePositive { ref field }) if field == "total_amount"
        ));

        assert!(validate_sale_header(&sale()).is_ok());
    }

    #[test]
    fn test_merge_line_items() {
        let items = vec![
            SaleLineItem { medicine_id: 1, quantity: 3 },
            SaleLineItem { medicine_id: 2, quantity: 1 },
            SaleLineItem { medicine_id: 1, quantity: 4 },
        ];

        let merged = merge_line_items(&items).unwrap();
        assert_eq!(
            merged,
            vec![
                SaleLineItem { medicine_id: 1, quantity: 7 },
                SaleLineItem { medicine_id: 2, quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_merge_line_items_rejects_oversized_totals() {
        let half = i64::MAX / 2 + 10;
        let items = vec![
            SaleLineItem { medicine_id: 1, quantity: half },
            SaleLineItem { medicine_id: 1, quantity: half },
        ];
        assert!(matches!(
            merge_line_items(&items),
            Err(ValidationError::TooLarge { ref field, max }) if field == "quantity" && max == MAX_QUANTITY
        ));

        let items = vec![
            SaleLineItem { medicine_id: 1, quantity: MAX_QUANTITY },
            SaleLineItem { medicine_id: 1, quantity: 1 },
        ];
        assert!(matches!(merge_line_items(&items), Err(ValidationError::TooLarge { .. })));

        let items = vec![SaleLineItem { medicine_id: 1, quantity: MAX_QUANTITY }];
        assert!(merge_line_items(&items).is_ok());
    }

    #[test]
    fn test_sale_header_bounds() {
        let mut bad = sale();
        bad.total_amount = Money::from_minor(MAX_AMOUNT_MINOR + 1);
        assert!(matches!(
            validate_sale_header(&bad),
            Err(ValidationError::TooLarge { ref field, .. }) if field == "total_amount"
        ));

        let mut bad = sale();
        bad.items_count = i64::MAX;
        assert!(matches!(
            validate_sale_header(&bad),
            Err(ValidationError::TooLarge { ref field, .. }) if field == "items_count"
        ));
    }

    #[test]
    fn test_merge_line_items_rejects_empty_and_non_positive() {
        assert_eq!(merge_line_items(&[]), Err(ValidationError::EmptySale));

        let items = vec![SaleLineItem { medicine_id: 1, quantity: 0 }];
        assert!(matches!(
            merge_line_items(&items),
            Err(ValidationError::MustBePositive { .. })
        ));
    }
}
