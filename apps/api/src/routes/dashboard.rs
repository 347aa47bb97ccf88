//! Dashboard summary endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use tracing::debug;

use crate::dto::{DashboardStatsResponse, RecentSalesQuery, SaleResponse};
use crate::error::ApiResult;
use crate::AppState;
use pharmacy_core::validation::recent_sales_limit;

/// `GET /api/dashboard/stats`
///
/// "Today" is the current UTC calendar day.
pub async fn stats(State(state): State<AppState>) -> ApiResult<Json<DashboardStatsResponse>> {
    let today = Utc::now().date_naive();
    let stats = state.db.reports().dashboard_stats(today).await?;

    debug!(%today, sales = %stats.todays_sales, "Dashboard stats computed");

    Ok(Json(stats.into()))
}

/// `GET /api/dashboard/recent-sales?limit=`
pub async fn recent_sales(
    State(state): State<AppState>,
    query: Result<Query<RecentSalesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<SaleResponse>>> {
    let Query(query) = query?;
    let limit = recent_sales_limit(query.limit);

    let sales = state.db.sales().recent(limit).await?;

    Ok(Json(sales.into_iter().map(SaleResponse::from).collect()))
}
