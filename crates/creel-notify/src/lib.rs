//! Creel Webhook Delivery
//!
//! Outbound notification fan-out for webhook subscribers. Delivery is
//! best-effort: failures are logged and never fail the request that
//! triggered them.

pub mod client;
pub mod error;

pub use client::WebhookNotifier;
pub use error::NotifyError;
