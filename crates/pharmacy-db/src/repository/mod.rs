//! # Repository Module
//!
//! Database repository implementations for the pharmacy POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.medicines().list(&filter)                            │
//! │       ▼                                                                 │
//! │  MedicineRepository                                                    │
//! │  ├── list(&self, filter)                                               │
//! │  ├── get(&self, id)                                                    │
//! │  ├── create(&self, input)                                              │
//! │  ├── update(&self, id, input)                                          │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`medicine::MedicineRepository`] - Inventory ledger CRUD and search
//! - [`sale::SaleRepository`] - Atomic sale processing and sale lookups
//! - [`report::ReportRepository`] - Dashboard aggregation

pub mod medicine;
pub mod report;
pub mod sale;
