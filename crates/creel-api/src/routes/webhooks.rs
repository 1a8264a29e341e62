//! Webhook subscription routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use creel_db::NewWebhook;
use tracing::info;
use url::Url;

use crate::error::ApiError;
use crate::state::AppState;

use super::auth::RequireAuth;
use super::types::{WebhookRequest, WebhookResponse};

/// Validate a subscriber endpoint URL
fn validate_webhook_url(raw: &str) -> Result<(), ApiError> {
    let url = Url::parse(raw)
        .map_err(|_| ApiError::BadRequest("Webhook URL is not a valid URL".to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ApiError::BadRequest(
            "Webhook URL must use http or https".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/reports/webhook
async fn register_webhook(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Json(request): Json<WebhookRequest>,
) -> Result<(StatusCode, Json<WebhookResponse>), ApiError> {
    validate_webhook_url(&request.url)?;

    let webhook = state
        .db
        .insert_webhook(NewWebhook {
            user_id: identity.id,
            url: request.url,
        })
        .await?;

    info!(
        "Registered webhook {} for user {}",
        webhook.id, identity.username
    );

    Ok((
        StatusCode::CREATED,
        Json(WebhookResponse {
            id: webhook.id,
            url: webhook.url,
            created_at: webhook.created_at.to_rfc3339(),
        }),
    ))
}

/// Create webhook routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/reports/webhook", post(register_webhook))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_webhook_url() {
        assert!(validate_webhook_url("https://example.com/hook").is_ok());
        assert!(validate_webhook_url("http://example.com/hook").is_ok());

        assert!(validate_webhook_url("not a url").is_err());
        assert!(validate_webhook_url("ftp://example.com/hook").is_err());
    }
}
