//! # Routes
//!
//! ```text
//! /api
//! ├── /health                         GET     liveness
//! ├── /health/db                      GET     store readiness
//! ├── /dashboard
//! │   ├── /stats                      GET     summary cards
//! │   └── /recent-sales               GET     latest sales
//! ├── /inventory/medicines            GET     list / search
//! │                                   POST    create
//! ├── /inventory/medicines/{id}       GET     fetch one
//! │                                   PUT     update
//! │                                   DELETE  remove
//! ├── /sales/create-sale              POST    atomic sale
//! └── /sales/{id}                     GET     sale + line snapshots
//! ```

pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod sales;

use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

/// All `/api` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/db", get(health::db_health_check))
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/recent-sales", get(dashboard::recent_sales))
        .route(
            "/inventory/medicines",
            get(inventory::list_medicines).post(inventory::create_medicine),
        )
        .route(
            "/inventory/medicines/:id",
            get(inventory::get_medicine)
                .put(inventory::update_medicine)
                .delete(inventory::delete_medicine),
        )
        .route("/sales/create-sale", post(sales::create_sale))
        .route("/sales/:id", get(sales::get_sale))
}
