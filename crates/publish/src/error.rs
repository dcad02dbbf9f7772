//! Publish errors

use thiserror::Error;

/// Errors returned by a [`crate::BatchPublisher`].
#[derive(Debug, Error)]
pub enum PublishError {
    /// The service answered with a non-success status.
    #[error("pinning service rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The service could not be reached or the exchange was interrupted.
    #[error("pinning service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered successfully but the receipt was unreadable.
    #[error("invalid pinning receipt: {0}")]
    InvalidReceipt(String),
}

pub type Result<T> = std::result::Result<T, PublishError>;
