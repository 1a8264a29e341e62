//! API routes

pub mod auth;
mod health;
mod reports;
pub mod types;
mod webhooks;

use axum::Router;

use crate::state::AppState;

// Re-export the auth extractors for external use
pub use auth::{MaybeAuth, RequireAuth};

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(reports::routes())
        .merge(webhooks::routes())
        .with_state(state)
}
