//! Off-chain publication of allow-list credentials.
//!
//! Every credential is pinned as a small JSON record on a content-addressed
//! pinning service, named `{chainId}-{auctionId}-{address}` so auction
//! front-ends can look it up without the batch files.

pub mod error;
pub mod payload;
pub mod pinata;

pub use error::{PublishError, Result};
pub use payload::{content_name, PinRequest, PublishReceipt};
pub use pinata::PinataPublisher;

use allowlist_core::Credential;
use async_trait::async_trait;
use std::sync::Arc;

/// Sink that durably publishes one credential.
///
/// Implementations must be safe to call concurrently and must not retry on
/// their own.
#[async_trait]
pub trait BatchPublisher: Send + Sync {
    async fn publish(&self, chain_id: u64, credential: &Credential) -> Result<PublishReceipt>;
}

#[async_trait]
impl<T: BatchPublisher + ?Sized> BatchPublisher for Arc<T> {
    async fn publish(&self, chain_id: u64, credential: &Credential) -> Result<PublishReceipt> {
        (**self).publish(chain_id, credential).await
    }
}
