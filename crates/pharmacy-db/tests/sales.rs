//! Sale transaction processor tests.

mod common;

use common::*;
use pharmacy_core::{CoreError, MedicineStatus, Money, SaleStatus, ValidationError};
use pharmacy_db::DbError;

#[tokio::test]
async fn sale_decrements_stock_and_recomputes_status() {
    let db = test_db().await;
    let a = add_medicine(&db, "Aspirin", 50).await;
    let b = add_medicine(&db, "Amoxicillin", 5).await;

    let sale = db
        .sales()
        .create_sale(&new_sale("INV100", &[(a.id, 10), (b.id, 5)]))
        .await
        .unwrap();

    assert!(sale.id > 0);
    assert_eq!(sale.status, SaleStatus::Completed);
    assert_eq!(sale.invoice_no, "INV100");
    assert_eq!(sale.total_amount, Money::from_minor(4550));

    let a = db.medicines().get(a.id).await.unwrap();
    let b = db.medicines().get(b.id).await.unwrap();
    assert_eq!(a.quantity, 40);
    assert_eq!(a.status, MedicineStatus::Active);
    assert_eq!(b.quantity, 0);
    assert_eq!(b.status, MedicineStatus::OutOfStock);

    let detail = db.sales().get(sale.id).await.unwrap();
    assert_eq!(detail.sale, sale);
    assert_eq!(detail.items.len(), 2);
    assert_eq!(detail.items[0].medicine_id, a.id);
    assert_eq!(detail.items[0].quantity, 10);
    assert_eq!(detail.items[1].medicine_name, "Amoxicillin");
}

#[tokio::test]
async fn sale_crossing_threshold_becomes_low_stock() {
    let db = test_db().await;
    let a = add_medicine(&db, "Ibuprofen", 25).await;

    db.sales()
        .create_sale(&new_sale("INV101", &[(a.id, 10)]))
        .await
        .unwrap();

    let a = db.medicines().get(a.id).await.unwrap();
    assert_eq!(a.quantity, 15);
    assert_eq!(a.status, MedicineStatus::LowStock);
}

#[tokio::test]
async fn insufficient_stock_rejects_without_writes() {
    let db = test_db().await;
    let a = add_medicine(&db, "Paracetamol", 10).await;

    let err = db
        .sales()
        .create_sale(&new_sale("INV102", &[(a.id, 12)]))
        .await
        .unwrap_err();

    match err {
        DbError::Rejected(CoreError::InsufficientStock {
            medicine,
            available,
            requested,
        }) => {
            assert_eq!(medicine, "Paracetamol");
            assert_eq!(available, 10);
            assert_eq!(requested, 12);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(db.medicines().get(a.id).await.unwrap().quantity, 10);
    assert_eq!(sale_count(&db).await, 0);
}

#[tokio::test]
async fn duplicate_lines_are_merged_before_stock_check() {
    let db = test_db().await;
    let a = add_medicine(&db, "Cetirizine", 10).await;

    let err = db
        .sales()
        .create_sale(&new_sale("INV103", &[(a.id, 6), (a.id, 6)]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::Rejected(CoreError::InsufficientStock { requested: 12, .. })
    ));

    let sale = db
        .sales()
        .create_sale(&new_sale("INV104", &[(a.id, 4), (a.id, 6)]))
        .await
        .unwrap();

    let detail = db.sales().get(sale.id).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].quantity, 10);
    assert_eq!(db.medicines().get(a.id).await.unwrap().quantity, 0);
}

#[tokio::test]
async fn duplicate_invoice_is_a_conflict_and_writes_nothing() {
    let db = test_db().await;
    let a = add_medicine(&db, "Aspirin", 100).await;

    db.sales()
        .create_sale(&new_sale("INV001", &[(a.id, 1)]))
        .await
        .unwrap();

    let err = db
        .sales()
        .create_sale(&new_sale("INV001", &[(a.id, 5)]))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DbError::Rejected(CoreError::DuplicateInvoice(ref inv)) if inv == "INV001"
    ));
    assert_eq!(db.medicines().get(a.id).await.unwrap().quantity, 99);
    assert_eq!(sale_count(&db).await, 1);
}

#[tokio::test]
async fn unknown_medicine_is_not_found() {
    let db = test_db().await;
    let a = add_medicine(&db, "Aspirin", 100).await;

    let err = db
        .sales()
        .create_sale(&new_sale("INV105", &[(a.id, 1), (777, 1)]))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Rejected(CoreError::MedicineNotFound(777))));
    assert_eq!(db.medicines().get(a.id).await.unwrap().quantity, 100);
    assert_eq!(sale_count(&db).await, 0);
}

#[tokio::test]
async fn preconditions_fail_in_order() {
    let db = test_db().await;
    let a = add_medicine(&db, "Aspirin", 100).await;
    db.sales()
        .create_sale(&new_sale("INV200", &[(a.id, 1)]))
        .await
        .unwrap();

    // Blank customer beats the duplicate invoice
    let mut sale = new_sale("INV200", &[]);
    sale.customer_name = " ".to_string();
    let err = db.sales().create_sale(&sale).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Rejected(CoreError::Validation(ValidationError::Required { .. }))
    ));

    // Non-positive total beats the duplicate invoice
    let mut sale = new_sale("INV200", &[]);
    sale.total_amount = Money::zero();
    let err = db.sales().create_sale(&sale).await.unwrap_err();
    assert!(matches!(
        err,
        DbError::Rejected(CoreError::Validation(ValidationError::MustBePositive { .. }))
    ));

    // Duplicate invoice beats the empty line list
    let err = db
        .sales()
        .create_sale(&new_sale("INV200", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Rejected(CoreError::DuplicateInvoice(_))));

    let err = db
        .sales()
        .create_sale(&new_sale("INV201", &[]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::Rejected(CoreError::Validation(ValidationError::EmptySale))
    ));

    let err = db
        .sales()
        .create_sale(&new_sale("INV202", &[(a.id, 0)]))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::Rejected(CoreError::Validation(ValidationError::MustBePositive { .. }))
    ));
}

#[tokio::test]
async fn failure_mid_transaction_rolls_back_everything() {
    let db = test_db().await;
    let a = add_medicine(&db, "Aspirin", 50).await;
    let b = add_medicine(&db, "Amoxicillin", 50).await;

    let trigger = format!(
        "CREATE TRIGGER fail_second_update BEFORE UPDATE ON medicines \
         WHEN NEW.id = {} BEGIN SELECT RAISE(ABORT, 'boom'); END;",
        b.id
    );
    sqlx::query(&trigger).execute(db.pool()).await.unwrap();

    let err = db
        .sales()
        .create_sale(&new_sale("INV300", &[(a.id, 10), (b.id, 5)]))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::TransactionFailed(ref msg) if msg.contains("boom")));
    assert_eq!(db.medicines().get(a.id).await.unwrap().quantity, 50);
    assert_eq!(sale_count(&db).await, 0);

    let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(items, 0);
}

#[tokio::test]
async fn recent_returns_newest_first_with_limit() {
    let db = test_db().await;
    let a = add_medicine(&db, "Aspirin", 100).await;

    for invoice in ["INV1", "INV2", "INV3"] {
        db.sales()
            .create_sale(&new_sale(invoice, &[(a.id, 1)]))
            .await
            .unwrap();
    }

    let recent = db.sales().recent(2).await.unwrap();
    let invoices: Vec<_> = recent.iter().map(|s| s.invoice_no.as_str()).collect();
    assert_eq!(invoices, ["INV3", "INV2"]);

    assert!(db.sales().invoice_exists("INV1").await.unwrap());
    assert!(!db.sales().invoice_exists("INV9").await.unwrap());
}

#[tokio::test]
async fn missing_sale_is_not_found() {
    let db = test_db().await;

    let err = db.sales().get(5).await.unwrap_err();
    assert!(matches!(err, DbError::Rejected(CoreError::SaleNotFound(5))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_sales_on_different_medicines_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let db = file_db(&dir, 8).await;

    let mut ids = Vec::new();
    for n in 0..16 {
        ids.push(add_medicine(&db, &format!("Medicine {n}"), 50).await.id);
    }

    let handles: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(n, &id)| {
            let db = db.clone();
            tokio::spawn(async move {
                db.sales()
                    .create_sale(&new_sale(&format!("PAR{n}"), &[(id, 1)]))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(sale_count(&db).await, 16);
    for id in ids {
        assert_eq!(db.medicines().get(id).await.unwrap().quantity, 49);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_sales_never_oversell() {
    let dir = tempfile::tempdir().unwrap();
    let db = file_db(&dir, 8).await;
    let id = add_medicine(&db, "Insulin", 5).await.id;

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let db = db.clone();
            tokio::spawn(async move {
                db.sales()
                    .create_sale(&new_sale(&format!("RACE{n}"), &[(id, 1)]))
                    .await
            })
        })
        .collect();

    let mut sold = 0;
    let mut short = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => sold += 1,
            Err(DbError::Rejected(CoreError::InsufficientStock { available: 0, .. })) => short += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!((sold, short), (5, 3));
    let after = db.medicines().get(id).await.unwrap();
    assert_eq!(after.quantity, 0);
    assert_eq!(after.status, MedicineStatus::OutOfStock);
    assert_eq!(sale_count(&db).await, 5);
}
