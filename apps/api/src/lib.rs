//! # pharmacy-api: REST API for the Pharmacy Dashboard
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pharmacy API Server                              │
//! │                                                                         │
//! │  Dashboard ──► HTTP (8000) ──► CORS ──► Trace ──► Router ──► Handlers  │
//! │                                                                │        │
//! │                                                                ▼        │
//! │                                                    pharmacy-db (SQLite) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Handlers translate JSON to domain types and back; every rule lives in
//! pharmacy-core and every query in pharmacy-db.

pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use pharmacy_db::Database;

/// Application state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// SQLite database handle
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

/// Creates the application router.
///
/// All routes live under `/api`; CORS and request tracing wrap the whole
/// tree.
pub fn create_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
