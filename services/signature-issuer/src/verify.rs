//! Offline verification of written batch files.

use crate::error::{PipelineError, Result};
use crate::writer::read_batch_file;
use allowlist_core::Address;
use allowlist_crypto::{recover_issuer, AllowListDomain};
use serde::Serialize;
use std::path::Path;

/// Per-file verification outcome.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub auction_id: u64,
    pub chain_id: u64,
    pub allow_list_contract: String,
    pub total: usize,
    pub valid: usize,
    /// Users whose signature does not recover to the expected signer.
    pub invalid_users: Vec<String>,
}

impl VerifyReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_users.is_empty()
    }
}

/// Checks every credential of the batch file at `path` against
/// `expected_signer`, using the domain recorded in the file itself.
pub fn verify_batch_file(path: &Path, expected_signer: Address) -> Result<VerifyReport> {
    let file = read_batch_file(path).map_err(|source| PipelineError::Persistence {
        chunk: None,
        source,
    })?;
    let batch = file.into_batch(0)?;
    let domain = AllowListDomain::build(batch.chain_id, batch.allow_list_contract);

    let mut invalid_users = Vec::new();
    for credential in &batch.credentials {
        match recover_issuer(&domain, credential) {
            Ok(issuer) if issuer == expected_signer => {}
            Ok(issuer) => {
                tracing::warn!(user = %credential.address, recovered = %issuer, "Signature from unexpected signer");
                invalid_users.push(credential.address.to_checksum(None));
            }
            Err(e) => {
                tracing::warn!(user = %credential.address, error = %e, "Unrecoverable signature");
                invalid_users.push(credential.address.to_checksum(None));
            }
        }
    }

    Ok(VerifyReport {
        auction_id: batch.auction_id,
        chain_id: batch.chain_id,
        allow_list_contract: batch.allow_list_contract.to_checksum(None),
        total: batch.credentials.len(),
        valid: batch.credentials.len() - invalid_users.len(),
        invalid_users,
    })
}
