//! Analytics routes: progress trends and per-student progress reports.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::query::{StudentQuery, TrendQuery};
use crate::routes::parse_query;
use crate::services::aggregation::TrendPoint;
use crate::services::dashboard::{self, StudentProgressReport};
use crate::AppState;

/// GET /api/v1/analytics/progress-trend: daily activity over a trailing window.
pub async fn progress_trend(
    State(state): State<AppState>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<TrendPoint>>>, AppError> {
    let query = parse_query(query)?;
    let student_id = query.student_id();
    let window_days = query.window_days(state.config.max_trend_days);

    let trend = dashboard::get_trend(
        &state.db,
        student_id,
        window_days,
        state.config.fallback_mode,
    )
    .await?;
    Ok(ApiResponse::success(trend))
}

/// GET /api/v1/student/progress: summary plus every enrolled course. `userId` is required.
pub async fn student_progress(
    State(state): State<AppState>,
    query: Result<Query<StudentQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<StudentProgressReport>>, AppError> {
    let student_id = parse_query(query)?
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let report = dashboard::get_student_progress(&state.db, student_id).await?;
    Ok(ApiResponse::success(report))
}
