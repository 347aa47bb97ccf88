//! Sale endpoints.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::{info, warn};

use crate::dto::{SaleDetailResponse, SaleRequest, SaleResponse};
use crate::error::{ApiError, ApiResult};
use crate::AppState;
use pharmacy_core::NewSale;

/// `POST /api/sales/create-sale`
///
/// Validates every line against stock, records the sale and decrements
/// inventory in one transaction. Nothing is written on any failure.
pub async fn create_sale(
    State(state): State<AppState>,
    body: Result<Json<SaleRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SaleResponse>)> {
    let Json(body) = body?;
    let sale = NewSale::try_from(body)?;

    let recorded = state.db.sales().create_sale(&sale).await.map_err(|e| {
        let err = ApiError::from(e);
        warn!(invoice_no = %sale.invoice_no, code = ?err.code, "Sale rejected: {}", err.message);
        err
    })?;

    info!(id = recorded.id, invoice_no = %recorded.invoice_no, "Sale created");

    Ok((StatusCode::CREATED, Json(recorded.into())))
}

/// `GET /api/sales/{id}`
pub async fn get_sale(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<SaleDetailResponse>> {
    let Path(id) = id?;
    let detail = state.db.sales().get(id).await?;

    Ok(Json(detail.into()))
}
