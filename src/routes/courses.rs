//! Course catalog routes: batch details, overview, and recommendations.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ApiResponse, AppError, STATUS_SUCCESS};
use crate::models::course::Course;
use crate::models::query::{StudentQuery, DEFAULT_STUDENT_ID};
use crate::routes::parse_query;
use crate::services::dashboard::{self, CourseOverview};
use crate::AppState;

const COURSE_IDS_MESSAGE: &str = "courseIds must be a non-empty array";

#[derive(Debug, Deserialize, Validate)]
pub struct CourseDetailsRequest {
    #[serde(rename = "courseIds")]
    #[validate(length(min = 1))]
    pub course_ids: Vec<i64>,
    #[serde(rename = "userId")]
    pub user_id: Option<i64>,
}

/// `{status, total, courses}` body for batch course lookups.
#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub status: &'static str,
    pub total: usize,
    pub courses: Vec<Course>,
}

/// POST /api/v1/courses/details: catalog rows for a list of course ids.
///
/// A missing, empty, or non-array `courseIds` is rejected before any lookup.
pub async fn details(
    State(state): State<AppState>,
    payload: Result<Json<CourseDetailsRequest>, JsonRejection>,
) -> Result<Json<CourseListResponse>, AppError> {
    let Json(body) = payload.map_err(|e| {
        tracing::debug!(error = %e, "Rejected course details body");
        AppError::Validation(COURSE_IDS_MESSAGE.to_string())
    })?;
    body.validate()
        .map_err(|_| AppError::Validation(COURSE_IDS_MESSAGE.to_string()))?;

    tracing::debug!(
        user_id = body.user_id.unwrap_or(DEFAULT_STUDENT_ID),
        requested = body.course_ids.len(),
        "Course details requested"
    );

    let courses =
        dashboard::get_course_details(&state.db, &body.course_ids, state.config.fallback_mode)
            .await?;

    Ok(Json(CourseListResponse {
        status: STATUS_SUCCESS,
        total: courses.len(),
        courses,
    }))
}

/// GET /api/v1/courses/total: catalog size, featured courses, recent activity.
pub async fn overview(
    State(state): State<AppState>,
    query: Result<Query<StudentQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<CourseOverview>>, AppError> {
    let query = parse_query(query)?;
    let overview = dashboard::get_course_overview(&state.db, query.user_id).await?;
    Ok(ApiResponse::success(overview))
}

/// GET /api/v1/recommendations: courses the student has not enrolled in.
pub async fn recommendations(
    State(state): State<AppState>,
    query: Result<Query<StudentQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Course>>>, AppError> {
    let student_id = parse_query(query)?.student_id();
    let courses = dashboard::get_recommendations(&state.db, student_id).await?;
    Ok(ApiResponse::success(courses))
}
