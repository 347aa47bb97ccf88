//! Liveness and readiness checks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;

/// Health check endpoint.
///
/// Returns a simple JSON response indicating the server is running.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "pharmacy-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Database health check endpoint.
///
/// Runs a trivial query and reports migration progress; 503 when the store
/// does not answer.
pub async fn db_health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    if !state.db.health_check().await {
        tracing::error!("Database health check failed");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let (total, applied) = pharmacy_db::migrations::migration_status(state.db.pool())
        .await
        .map_err(|e| {
            tracing::error!("Migration status check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    Ok(Json(json!({
        "status": "ok",
        "database": "connected",
        "migrations": { "total": total, "applied": applied }
    })))
}
