//! # Seed Data Loader
//!
//! Populates a database with the demo catalogue and sales for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./pharmacy.db (default)
//! cargo run -p pharmacy-db --bin seed
//!
//! # Specify database path
//! cargo run -p pharmacy-db --bin seed -- --db ./data/pharmacy.db
//! ```
//!
//! Seeding is skipped when the database already holds medicines.

use std::env;
use std::time::Instant;

use anyhow::{bail, Context};
use pharmacy_db::{seed, Database, DbConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_DB_PATH: &str = "./pharmacy.db";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    let mut db_path = DEFAULT_DB_PATH.to_string();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" | "-d" => {
                db_path = args.next().context("--db requires a path")?;
            }
            "--help" | "-h" => {
                println!("Pharmacy POS Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => bail!("unknown argument: {other} (try --help)"),
        }
    }

    println!("🌱 Pharmacy POS Seed Data Loader");
    println!("================================");
    println!("Database: {db_path}");
    println!();

    let start = Instant::now();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening database at {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let inserted = seed::seed_demo_data(&db).await.context("seeding demo data")?;

    if inserted == 0 {
        println!("⚠ Database already has medicines");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
    } else {
        println!("✓ Inserted {inserted} medicines in {:?}", start.elapsed());
    }

    db.close().await;
    Ok(())
}
