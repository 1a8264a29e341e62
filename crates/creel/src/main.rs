//! Creel - REST backend for a fishing club

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::Config;
use creel_api::{AppState, create_router};
use creel_auth::TokenManager;
use creel_db::Database;
use creel_notify::WebhookNotifier;

/// Creel - REST backend for a fishing club
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "CREEL_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "CREEL_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting Creel v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.refresh_secret == "change-me-in-production" {
        warn!("Using the default refresh secret; set [auth].refresh_secret");
    }

    // Create the data directory for the database file
    if let Some(parent) = Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // Initialize database
    let db_path = format!("sqlite:{}?mode=rwc", config.database.path);
    let db = Database::new(&db_path).await?;

    // Initialize the token manager from the configured key material
    let private_pem = std::fs::read(&config.auth.access_private_key_path).with_context(|| {
        format!(
            "Failed to read access-token private key: {}",
            config.auth.access_private_key_path
        )
    })?;
    let public_pem = std::fs::read(&config.auth.access_public_key_path).with_context(|| {
        format!(
            "Failed to read access-token public key: {}",
            config.auth.access_public_key_path
        )
    })?;
    let tokens = Arc::new(TokenManager::new(
        &private_pem,
        &public_pem,
        &config.auth.refresh_secret,
        config.auth.access_token_ttl_minutes,
        config.auth.refresh_token_ttl_days,
    )?);

    // Initialize the webhook notifier
    let notifier = Arc::new(WebhookNotifier::new(config.webhooks.timeout_secs)?);

    // Create application state
    let state = AppState::new(db, tokens, notifier, config.api.public_base_url.clone());

    // Create router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
