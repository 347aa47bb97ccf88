//! Shared fixtures for the repository tests.

#![allow(dead_code)]

use chrono::{Days, NaiveDate, Utc};
use pharmacy_core::{Medicine, MedicineInput, Money, NewSale, SaleLineItem};
use pharmacy_db::{Database, DbConfig};

pub async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// File-backed store, for tests that need several connections at once.
pub async fn file_db(dir: &tempfile::TempDir, max_connections: u32) -> Database {
    let config = DbConfig::new(dir.path().join("pharmacy.db")).max_connections(max_connections);
    Database::new(config).await.unwrap()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn days_from_today(days: i64) -> NaiveDate {
    if days >= 0 {
        today().checked_add_days(Days::new(days as u64)).unwrap()
    } else {
        today().checked_sub_days(Days::new(days.unsigned_abs())).unwrap()
    }
}

pub fn medicine_input(name: &str, quantity: i64) -> MedicineInput {
    MedicineInput {
        medicine_name: name.to_string(),
        generic_name: format!("{name} Generic"),
        category: "General".to_string(),
        batch_no: "B-1".to_string(),
        expiry_date: days_from_today(30),
        quantity,
        cost_price: Money::from_minor(500),
        mrp: Money::from_minor(900),
        supplier: "Acme Pharma".to_string(),
    }
}

pub async fn add_medicine(db: &Database, name: &str, quantity: i64) -> Medicine {
    db.medicines()
        .create(&medicine_input(name, quantity))
        .await
        .unwrap()
}

pub fn new_sale(invoice_no: &str, items: &[(i64, i64)]) -> NewSale {
    NewSale {
        invoice_no: invoice_no.to_string(),
        customer_name: "Walk-in".to_string(),
        items_count: items.iter().map(|(_, q)| q).sum(),
        total_amount: Money::from_minor(4550),
        payment_method: "Cash".to_string(),
        items: items
            .iter()
            .map(|&(medicine_id, quantity)| SaleLineItem {
                medicine_id,
                quantity,
            })
            .collect(),
    }
}

pub async fn sale_count(db: &Database) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM sales")
        .fetch_one(db.pool())
        .await
        .unwrap()
}
