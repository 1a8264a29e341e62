//! Creel REST API
//!
//! This crate provides the Axum-based HTTP API for Creel: account
//! registration and token endpoints, catch report resources, and
//! webhook subscription registration.

pub mod error;
pub mod links;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
