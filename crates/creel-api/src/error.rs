//! API error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] creel_db::DbError),

    #[error("Auth error: {0}")]
    Auth(#[from] creel_auth::AuthError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Unauthorized".to_string(),
            ),
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An unexpected condition was encountered".to_string(),
            ),
            ApiError::Database(e) => match e {
                creel_db::DbError::NotFound(msg) => {
                    (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone())
                }
                creel_db::DbError::Duplicate(_) => (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "The resource already exists".to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "An unexpected condition was encountered".to_string(),
                ),
            },
            ApiError::Auth(e) => match e {
                creel_auth::AuthError::Forbidden => (
                    StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    "The authenticated user does not own this resource".to_string(),
                ),
                creel_auth::AuthError::InvalidKey(_) | creel_auth::AuthError::PasswordHash(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An unexpected condition was encountered".to_string(),
                ),
                _ => (StatusCode::UNAUTHORIZED, "AUTH_ERROR", e.to_string()),
            },
        };

        // The full cause chain stays in the server log; clients only see
        // the generic message for the status code.
        if status.is_server_error() {
            error!("request failed: {:?}", self);
        } else {
            debug!("request rejected: {:?}", self);
        }

        let body = axum::Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
