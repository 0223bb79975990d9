//! Dashboard routes: per-student statistics for the overview page.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::query::StudentQuery;
use crate::routes::parse_query;
use crate::services::aggregation::DashboardStats;
use crate::services::dashboard;
use crate::AppState;

/// GET /api/v1/dashboard/stats: statistics via the store's grouped aggregate.
pub async fn stats(
    State(state): State<AppState>,
    query: Result<Query<StudentQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let student_id = parse_query(query)?.student_id();
    tracing::debug!(student_id, "Dashboard stats requested");
    let stats = dashboard::get_stats(&state.db, student_id, state.config.fallback_mode).await?;
    Ok(ApiResponse::success(stats))
}

/// GET /api/v1/dashboard/stats/simple: same statistics computed in-process.
pub async fn stats_simple(
    State(state): State<AppState>,
    query: Result<Query<StudentQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let student_id = parse_query(query)?.student_id();
    tracing::debug!(student_id, "Simple dashboard stats requested");
    let stats =
        dashboard::get_stats_simple(&state.db, student_id, state.config.fallback_mode).await?;
    Ok(ApiResponse::success(stats))
}
