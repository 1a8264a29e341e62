//! Authentication error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("Token expired")]
    TokenExpired,

    #[error("Token has been disabled")]
    TokenDisabled,

    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid authentication scheme")]
    InvalidScheme,

    #[error("Not the resource owner")]
    Forbidden,

    #[error("Invalid signing key: {0}")]
    InvalidKey(#[source] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Credentials invalid or not provided")
            }
            AuthError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthError::TokenDisabled => (StatusCode::UNAUTHORIZED, "Token has been disabled"),
            AuthError::MissingAuthHeader => {
                (StatusCode::UNAUTHORIZED, "Missing authorization header")
            }
            AuthError::InvalidScheme => {
                (StatusCode::UNAUTHORIZED, "Invalid authentication scheme")
            }
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            AuthError::InvalidKey(_) | AuthError::PasswordHash(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };

        let body = axum::Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
