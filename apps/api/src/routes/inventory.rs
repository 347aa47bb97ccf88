//! # Inventory Endpoints
//!
//! CRUD over the medicine ledger.
//!
//! ```text
//! JSON body ──► MedicineRequest ──try_from──► MedicineInput ──► db.medicines()
//!                                   │                               │
//!                     bad money ──► 400                  Medicine ──► MedicineResponse
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::dto::{MedicineQuery, MedicineRequest, MedicineResponse};
use crate::error::ApiResult;
use crate::AppState;
use pharmacy_core::validation::medicine_filter;
use pharmacy_core::MedicineInput;

/// `GET /api/inventory/medicines?search=&skip=&limit=`
pub async fn list_medicines(
    State(state): State<AppState>,
    query: Result<Query<MedicineQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<MedicineResponse>>> {
    let Query(query) = query?;
    let filter = medicine_filter(query.search.as_deref(), query.skip, query.limit)?;

    let medicines = state.db.medicines().list(&filter).await?;

    Ok(Json(medicines.into_iter().map(MedicineResponse::from).collect()))
}

/// `GET /api/inventory/medicines/{id}`
pub async fn get_medicine(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<MedicineResponse>> {
    let Path(id) = id?;
    let medicine = state.db.medicines().get(id).await?;

    Ok(Json(medicine.into()))
}

/// `POST /api/inventory/medicines`
pub async fn create_medicine(
    State(state): State<AppState>,
    body: Result<Json<MedicineRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MedicineResponse>)> {
    let Json(body) = body?;
    let input = MedicineInput::try_from(body)?;

    let medicine = state.db.medicines().create(&input).await?;

    info!(id = medicine.id, name = %medicine.medicine_name, "Medicine added");

    Ok((StatusCode::CREATED, Json(medicine.into())))
}

/// `PUT /api/inventory/medicines/{id}`
pub async fn update_medicine(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<MedicineRequest>, JsonRejection>,
) -> ApiResult<Json<MedicineResponse>> {
    let Path(id) = id?;
    let Json(body) = body?;
    let input = MedicineInput::try_from(body)?;

    let medicine = state.db.medicines().update(id, &input).await?;

    info!(id, status = %medicine.status, "Medicine updated");

    Ok(Json(medicine.into()))
}

/// `DELETE /api/inventory/medicines/{id}`
pub async fn delete_medicine(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    state.db.medicines().delete(id).await?;

    info!(id, "Medicine deleted");

    Ok(StatusCode::NO_CONTENT)
}
