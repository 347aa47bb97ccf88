//! Medicine ledger repository tests.

mod common;

use common::*;
use pharmacy_core::{CoreError, MedicineFilter, MedicineStatus, Money, ValidationError};
use pharmacy_db::DbError;

fn filter(search: Option<&str>, skip: i64, limit: i64) -> MedicineFilter {
    MedicineFilter {
        search: search.map(str::to_string),
        skip,
        limit,
    }
}

#[tokio::test]
async fn create_assigns_id_and_derives_status() {
    let db = test_db().await;

    let active = add_medicine(&db, "Ibuprofen", 200).await;
    let low = add_medicine(&db, "Amoxicillin", 15).await;
    let out = add_medicine(&db, "Paracetamol", 0).await;

    assert!(active.id > 0);
    assert_ne!(active.id, low.id);
    assert_eq!(active.status, MedicineStatus::Active);
    assert_eq!(low.status, MedicineStatus::LowStock);
    assert_eq!(out.status, MedicineStatus::OutOfStock);
    assert_eq!(active.cost_price, Money::from_minor(500));
    assert_eq!(active.mrp, Money::from_minor(900));
}

#[tokio::test]
async fn expiry_takes_precedence_and_today_is_not_expired() {
    let db = test_db().await;

    let mut input = medicine_input("Omeprazole", 15);
    input.expiry_date = days_from_today(-1);
    let expired = db.medicines().create(&input).await.unwrap();
    assert_eq!(expired.status, MedicineStatus::Expired);

    input.expiry_date = today();
    input.quantity = 50;
    let fresh = db.medicines().create(&input).await.unwrap();
    assert_eq!(fresh.status, MedicineStatus::Active);
}

#[tokio::test]
async fn create_rejects_mrp_below_cost() {
    let db = test_db().await;

    let mut input = medicine_input("Aspirin", 10);
    input.mrp = Money::from_minor(300);
    input.cost_price = Money::from_minor(500);

    let err = db.medicines().create(&input).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Rejected(CoreError::Validation(ValidationError::MrpBelowCost))
    ));
    assert_eq!(db.medicines().count().await.unwrap(), 0);
}

#[tokio::test]
async fn create_rejects_blank_names() {
    let db = test_db().await;

    let mut input = medicine_input("Aspirin", 10);
    input.generic_name = "   ".to_string();

    let err = db.medicines().create(&input).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Rejected(CoreError::Validation(ValidationError::Required { ref field }))
            if field == "generic_name"
    ));
}

#[tokio::test]
async fn get_missing_medicine_is_not_found() {
    let db = test_db().await;

    let err = db.medicines().get(42).await.unwrap_err();
    assert!(matches!(err, DbError::Rejected(CoreError::MedicineNotFound(42))));
}

#[tokio::test]
async fn update_overwrites_fields_and_recomputes_status() {
    let db = test_db().await;
    let medicine = add_medicine(&db, "Metformin", 85).await;

    let mut input = medicine_input("Metformin XR", 5);
    input.supplier = "DiabetesPlus".to_string();

    let updated = db.medicines().update(medicine.id, &input).await.unwrap();

    assert_eq!(updated.id, medicine.id);
    assert_eq!(updated.medicine_name, "Metformin XR");
    assert_eq!(updated.supplier, "DiabetesPlus");
    assert_eq!(updated.quantity, 5);
    assert_eq!(updated.status, MedicineStatus::LowStock);
    assert_eq!(updated.created_at, medicine.created_at);
    assert!(updated.updated_at >= medicine.updated_at);
}

#[tokio::test]
async fn update_reports_missing_id_before_validation() {
    let db = test_db().await;

    let mut invalid = medicine_input("Ghost", 1);
    invalid.cost_price = Money::zero();

    let err = db.medicines().update(999, &invalid).await.unwrap_err();
    assert!(matches!(err, DbError::Rejected(CoreError::MedicineNotFound(999))));

    let existing = add_medicine(&db, "Aspirin", 10).await;
    let err = db.medicines().update(existing.id, &invalid).await.unwrap_err();
    assert!(matches!(err, DbError::Rejected(CoreError::Validation(_))));
    assert_eq!(db.medicines().get(existing.id).await.unwrap().quantity, 10);
}

#[tokio::test]
async fn delete_removes_row_and_reports_missing() {
    let db = test_db().await;
    let medicine = add_medicine(&db, "Cetirizine", 120).await;

    db.medicines().delete(medicine.id).await.unwrap();
    assert!(db.medicines().find(medicine.id).await.unwrap().is_none());

    let err = db.medicines().delete(medicine.id).await.unwrap_err();
    assert!(matches!(err, DbError::Rejected(CoreError::MedicineNotFound(_))));
}

#[tokio::test]
async fn delete_keeps_sale_history() {
    let db = test_db().await;
    let medicine = add_medicine(&db, "Atorvastatin", 50).await;

    let sale = db
        .sales()
        .create_sale(&new_sale("INV-DEL", &[(medicine.id, 2)]))
        .await
        .unwrap();

    db.medicines().delete(medicine.id).await.unwrap();

    let detail = db.sales().get(sale.id).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].medicine_name, "Atorvastatin");
}

#[tokio::test]
async fn list_on_empty_store_is_empty() {
    let db = test_db().await;

    let medicines = db.medicines().list(&filter(None, 0, 100)).await.unwrap();
    assert!(medicines.is_empty());

    let medicines = db.medicines().list(&filter(Some("x"), 0, 100)).await.unwrap();
    assert!(medicines.is_empty());
}

#[tokio::test]
async fn list_searches_name_and_generic_case_insensitively() {
    let db = test_db().await;

    let mut input = medicine_input("Tylenol", 40);
    input.generic_name = "Acetaminophen".to_string();
    db.medicines().create(&input).await.unwrap();
    add_medicine(&db, "Aspirin", 40).await;
    add_medicine(&db, "Ibuprofen", 40).await;

    let by_generic = db
        .medicines()
        .list(&filter(Some("ACETA"), 0, 100))
        .await
        .unwrap();
    assert_eq!(by_generic.len(), 1);
    assert_eq!(by_generic[0].medicine_name, "Tylenol");

    let by_name = db
        .medicines()
        .list(&filter(Some("asp"), 0, 100))
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].medicine_name, "Aspirin");

    let wildcard = db
        .medicines()
        .list(&filter(Some("%"), 0, 100))
        .await
        .unwrap();
    assert!(wildcard.is_empty());
}

#[tokio::test]
async fn list_pages_in_id_order() {
    let db = test_db().await;
    for name in ["A", "B", "C", "D", "E"] {
        add_medicine(&db, name, 30).await;
    }

    let page = db.medicines().list(&filter(None, 1, 2)).await.unwrap();
    let names: Vec<_> = page.iter().map(|m| m.medicine_name.as_str()).collect();
    assert_eq!(names, ["B", "C"]);

    let all = db.medicines().list(&filter(None, 0, 100)).await.unwrap();
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));
}
