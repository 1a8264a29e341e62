//! Application state

use creel_auth::TokenManager;
use creel_db::Database;
use creel_notify::WebhookNotifier;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: Arc<TokenManager>,
    pub notifier: Arc<WebhookNotifier>,
    /// Public base URL, used only for hypermedia link construction
    pub base_url: String,
}

impl AppState {
    pub fn new(
        db: Database,
        tokens: Arc<TokenManager>,
        notifier: Arc<WebhookNotifier>,
        base_url: String,
    ) -> Self {
        Self {
            db,
            tokens,
            notifier,
            base_url,
        }
    }
}
