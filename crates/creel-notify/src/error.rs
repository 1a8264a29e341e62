//! Webhook delivery error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Subscriber responded with status {0}")]
    Rejected(u16),
}
