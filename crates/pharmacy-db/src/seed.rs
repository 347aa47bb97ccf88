//! # Demo Data
//!
//! One-shot seeding of a small demo catalogue and sale history.
//!
//! ## Rules
//! - Runs only when the medicines table is empty
//! - Uses the repositories' insert paths, so every row is validated and gets
//!   a derived status like any other write
//! - Sales whose invoice number already exists are skipped
//! - All rows go in under one transaction: a failed seed leaves the ledger
//!   empty, so the next start seeds again

use chrono::{Days, NaiveDate, Utc};
use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::Database;
use crate::repository::medicine::insert_medicine;
use crate::repository::sale::record_sale;
use pharmacy_core::{MedicineInput, Money, NewSale};

/// Offset of the expiry date from today.
#[derive(Debug, Clone, Copy)]
enum Expiry {
    In(u64),
    Ago(u64),
}

/// (name, generic, category, batch, expiry, quantity, cost minor, mrp minor, supplier)
type DemoMedicine = (&'static str, &'static str, &'static str, &'static str, Expiry, i64, i64, i64, &'static str);

const DEMO_MEDICINES: &[DemoMedicine] = &[
    ("Aspirin", "Acetylsalicylic Acid", "Pain Relief", "BATCH001", Expiry::In(365), 150, 250, 500, "PharmaCo"),
    ("Amoxicillin", "Amoxicillin", "Antibiotic", "BATCH002", Expiry::In(180), 15, 800, 2000, "MediSupply"),
    ("Paracetamol", "Acetaminophen", "Pain Relief", "BATCH003", Expiry::In(90), 0, 150, 350, "HealthCare Ltd"),
    ("Ibuprofen", "Ibuprofen", "Anti-inflammatory", "BATCH004", Expiry::In(200), 200, 300, 750, "MediCare"),
    ("Metformin", "Metformin HCL", "Diabetes", "BATCH005", Expiry::In(300), 85, 400, 1200, "DiabetesPlus"),
    ("Atorvastatin", "Atorvastatin", "Cardiology", "BATCH006", Expiry::In(120), 50, 600, 1800, "CardioHealth"),
    ("Omeprazole", "Omeprazole", "Gastro", "BATCH007", Expiry::Ago(10), 30, 250, 800, "GastroMed"),
    ("Cetirizine", "Cetirizine HCL", "Allergy", "BATCH008", Expiry::In(250), 120, 200, 600, "AllergyFree"),
];

/// (invoice, customer, items, total minor, payment method)
const DEMO_SALES: &[(&str, &str, i64, i64, &str)] = &[
    ("INV001", "John Doe", 3, 4550, "Cash"),
    ("INV002", "Jane Smith", 5, 12000, "Card"),
    ("INV003", "Michael Johnson", 2, 2850, "UPI"),
    ("INV004", "Sarah Williams", 4, 9575, "Cash"),
    ("INV005", "Robert Brown", 1, 1500, "Card"),
];

/// Inserts the demo catalogue and sale history into an empty ledger.
///
/// ## Returns
/// The number of medicines inserted; 0 when the ledger already had rows.
pub async fn seed_demo_data(db: &Database) -> DbResult<usize> {
    let mut tx = db.pool().begin_with("BEGIN IMMEDIATE").await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM medicines")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        info!(existing, "Medicines present, skipping demo seed");
        return Ok(0);
    }

    let now = Utc::now();
    let today = now.date_naive();

    for demo in DEMO_MEDICINES {
        let medicine = insert_medicine(&mut tx, &demo_medicine(demo, today), now).await?;
        debug!(id = medicine.id, name = %medicine.medicine_name, status = %medicine.status, "Seeded medicine");
    }

    let mut seeded_sales = 0;
    for &(invoice_no, customer_name, items_count, total_minor, payment_method) in DEMO_SALES {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM sales WHERE invoice_no = ?1)")
                .bind(invoice_no)
                .fetch_one(&mut *tx)
                .await?;
        if exists {
            continue;
        }

        let sale = NewSale {
            invoice_no: invoice_no.to_string(),
            customer_name: customer_name.to_string(),
            items_count,
            total_amount: Money::from_minor(total_minor),
            payment_method: payment_method.to_string(),
            items: Vec::new(),
        };
        record_sale(&mut tx, &sale, now).await?;
        seeded_sales += 1;
    }

    tx.commit().await?;

    info!(
        medicines = DEMO_MEDICINES.len(),
        sales = seeded_sales,
        "Demo data seeded"
    );

    Ok(DEMO_MEDICINES.len())
}

fn demo_medicine(demo: &DemoMedicine, today: NaiveDate) -> MedicineInput {
    let &(medicine_name, generic_name, category, batch_no, expiry, quantity, cost, mrp, supplier) = demo;

    let expiry_date = match expiry {
        Expiry::In(days) => today.checked_add_days(Days::new(days)),
        Expiry::Ago(days) => today.checked_sub_days(Days::new(days)),
    }
    .unwrap_or(today);

    MedicineInput {
        medicine_name: medicine_name.to_string(),
        generic_name: generic_name.to_string(),
        category: category.to_string(),
        batch_no: batch_no.to_string(),
        expiry_date,
        quantity,
        cost_price: Money::from_minor(cost),
        mrp: Money::from_minor(mrp),
        supplier: supplier.to_string(),
    }
}
