//! Unified error handling with the dashboard's `{status, ...}` response envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Envelope status for a successful response.
pub const STATUS_SUCCESS: &str = "success";
/// Envelope status for a client error (4xx).
pub const STATUS_FAIL: &str = "fail";
/// Envelope status for a server error (5xx).
pub const STATUS_ERROR: &str = "error";

/// Consistent JSON envelope for successful data responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a successful result in the envelope.
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            status: STATUS_SUCCESS,
            data,
        })
    }
}

/// Error body: `{status: "fail" | "error", message}`.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub status: &'static str,
    pub message: String,
}

/// Application error type mapping to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ApiError {
            status: if status.is_client_error() {
                STATUS_FAIL
            } else {
                STATUS_ERROR
            },
            message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_response_success() {
        let response = ApiResponse::success("hello");
        let json = serde_json::to_value(&response.0).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], "hello");
    }

    #[test]
    fn error_body_shape() {
        let body = ApiError {
            status: STATUS_FAIL,
            message: "User ID is required".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "fail");
        assert_eq!(json["message"], "User ID is required");
    }

    #[test]
    fn validation_error_maps_to_bad_request() {
        let response = AppError::Validation("courseIds must be a non-empty array".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn database_error_maps_to_server_error() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn app_error_display() {
        let err = AppError::Validation("userId is required".to_string());
        assert_eq!(err.to_string(), "Validation error: userId is required");
    }

    #[test]
    fn app_error_from_sqlx() {
        let sqlx_err = sqlx::Error::RowNotFound;
        let err: AppError = sqlx_err.into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
