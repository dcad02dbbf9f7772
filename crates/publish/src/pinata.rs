//! Pinata JSON pinning client.

use crate::error::{PublishError, Result};
use crate::payload::{PinRequest, PublishReceipt};
use crate::BatchPublisher;
use allowlist_core::config::PublishConfig;
use allowlist_core::{Credential, Secret};
use async_trait::async_trait;
use std::time::Duration;

/// Publishes credentials to Pinata with a bearer JWT.
///
/// Requests are never retried: a failed publish is reported to the caller,
/// which decides whether to re-run.
pub struct PinataPublisher {
    client: reqwest::Client,
    endpoint: String,
    jwt: Secret,
    cid_version: u8,
}

impl PinataPublisher {
    pub fn new(config: &PublishConfig, jwt: Secret) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            jwt,
            cid_version: config.cid_version,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl BatchPublisher for PinataPublisher {
    async fn publish(&self, chain_id: u64, credential: &Credential) -> Result<PublishReceipt> {
        let request = PinRequest::for_credential(chain_id, credential, self.cid_version);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.jwt.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                status = status.as_u16(),
                name = %request.pinata_metadata.name,
                "Pinning request rejected"
            );
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let receipt: PublishReceipt = response
            .json()
            .await
            .map_err(|e| PublishError::InvalidReceipt(e.to_string()))?;

        tracing::debug!(
            name = %request.pinata_metadata.name,
            cid = %receipt.ipfs_hash,
            "Pinned credential"
        );
        Ok(receipt)
    }
}
