//! Route definitions for the progress dashboard API.

pub mod analytics;
pub mod courses;
pub mod dashboard;
pub mod health;

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::errors::AppError;
use crate::AppState;

/// Unwrap a query extractor, turning malformed query strings into a 400 envelope.
pub(crate) fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::Validation(e.body_text()))
}

/// CORS policy allowing the configured front end, with credentials.
fn cors_layer(frontend_url: &str) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    match frontend_url.parse::<HeaderValue>() {
        Ok(origin) => base.allow_origin(origin),
        Err(e) => {
            tracing::warn!(error = %e, frontend_url, "Invalid FRONTEND_URL, CORS origin disabled");
            base
        }
    }
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/dashboard/stats", get(dashboard::stats))
        .route("/dashboard/stats/simple", get(dashboard::stats_simple))
        .route("/courses/details", post(courses::details))
        .route("/courses/total", get(courses::overview))
        .route("/recommendations", get(courses::recommendations))
        .route("/analytics/progress-trend", get(analytics::progress_trend))
        .route("/student/progress", get(analytics::student_progress));

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .nest("/api/v1", api_routes)
        .layer(cors_layer(&state.config.frontend_url))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
