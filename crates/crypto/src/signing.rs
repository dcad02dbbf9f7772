//! Credential Signing Service
//!
//! A credential is an EIP-191 personal signature over
//!
//! ```text
//! keccak256(abi.encode(bytes32 domainSeparator, address user, uint256 auctionId))
//! ```
//!
//! The signing key is never held by this module: signing is delegated to a
//! [`MessageSigner`] capability, which may be a local key or a remote wallet.
//! Signatures are deterministic (RFC 6979) for local keys.

use crate::domain::AllowListDomain;
use allowlist_core::config::{KeySource, DEVELOPMENT_MNEMONIC};
use allowlist_core::{Credential, CredentialSignature};
use alloy_primitives::{keccak256, Address, Signature, B256, U256};
use alloy_signer::Signer as _;
use alloy_signer_local::{coins_bip39::English, MnemonicBuilder, PrivateKeySigner};
use alloy_sol_types::SolValue;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use zeroize::Zeroize;

/// Errors that can occur during signing operations.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Signer unavailable or rejected the request: {reason}")]
    SignerFailure { reason: String },

    #[error("Invalid key material: {reason}")]
    InvalidKey { reason: String },

    #[error("Invalid signature: {reason}")]
    InvalidSignature { reason: String },
}

/// Capability that produces recoverable personal-message signatures
/// (`"\x19Ethereum Signed Message:\n" || len || message`).
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait MessageSigner: Send + Sync {
    /// Address whose key produces the signatures.
    fn address(&self) -> Address;

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, SigningError>;
}

#[async_trait]
impl<T: MessageSigner + ?Sized> MessageSigner for Arc<T> {
    fn address(&self) -> Address {
        (**self).address()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, SigningError> {
        (**self).sign_message(message).await
    }
}

/// [`MessageSigner`] backed by an in-process secp256k1 key.
#[derive(Debug, Clone)]
pub struct LocalKeySigner {
    inner: PrivateKeySigner,
}

impl LocalKeySigner {
    /// Creates a signer from a hex encoded 32-byte private key.
    ///
    /// # Security
    /// The decoded key bytes are zeroized after use.
    pub fn from_private_key(key_hex: &str) -> Result<Self, SigningError> {
        let digits = key_hex.trim();
        let digits = digits.strip_prefix("0x").unwrap_or(digits);

        let mut bytes = hex::decode(digits).map_err(|e| SigningError::InvalidKey {
            reason: e.to_string(),
        })?;
        if bytes.len() != 32 {
            let len = bytes.len();
            bytes.zeroize();
            return Err(SigningError::InvalidKey {
                reason: format!("Invalid key length: {} (expected 32)", len),
            });
        }

        let mut key = B256::from_slice(&bytes);
        bytes.zeroize();
        let signer = PrivateKeySigner::from_bytes(&key);
        key.0.zeroize();

        let inner = signer.map_err(|e| SigningError::InvalidKey {
            reason: e.to_string(),
        })?;
        Ok(Self { inner })
    }

    /// Derives the key at `m/44'/60'/0'/0/{index}` from a BIP-39 phrase.
    pub fn from_mnemonic(phrase: &str, index: u32) -> Result<Self, SigningError> {
        let invalid = |e: alloy_signer_local::LocalSignerError| SigningError::InvalidKey {
            reason: e.to_string(),
        };
        let inner = MnemonicBuilder::<English>::default()
            .phrase(phrase.trim())
            .index(index)
            .map_err(invalid)?
            .build()
            .map_err(invalid)?;
        Ok(Self { inner })
    }

    /// Builds the signer described by the issuer configuration.
    pub fn from_key_source(source: KeySource<'_>) -> Result<Self, SigningError> {
        match source {
            KeySource::PrivateKey(key) => Self::from_private_key(key),
            KeySource::Mnemonic(phrase) => Self::from_mnemonic(phrase, 0),
            KeySource::DevelopmentMnemonic => {
                tracing::warn!("No signing key configured, using the public development mnemonic");
                Self::from_mnemonic(DEVELOPMENT_MNEMONIC, 0)
            }
        }
    }
}

#[async_trait]
impl MessageSigner for LocalKeySigner {
    fn address(&self) -> Address {
        self.inner.address()
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, SigningError> {
        self.inner
            .sign_message(message)
            .await
            .map_err(|e| SigningError::SignerFailure {
                reason: e.to_string(),
            })
    }
}

/// Digest signed for `user` in `auction_id` under `domain`.
pub fn credential_digest(domain: &AllowListDomain, auction_id: u64, user: Address) -> B256 {
    let encoded = (domain.separator(), user, U256::from(auction_id)).abi_encode();
    keccak256(encoded)
}

/// Splits a signature into `(v, r, s)` with `v` in the 27/28 form.
pub fn split_signature(signature: &Signature) -> CredentialSignature {
    CredentialSignature {
        v: 27 + u8::from(signature.v()),
        r: B256::from(signature.r().to_be_bytes::<32>()),
        s: B256::from(signature.s().to_be_bytes::<32>()),
    }
}

/// Inverse of [`split_signature`].
pub fn join_signature(signature: &CredentialSignature) -> Result<Signature, SigningError> {
    let parity = match signature.v {
        27 => false,
        28 => true,
        v => {
            return Err(SigningError::InvalidSignature {
                reason: format!("unexpected recovery id {}", v),
            })
        }
    };
    Ok(Signature::new(
        U256::from_be_bytes(signature.r.0),
        U256::from_be_bytes(signature.s.0),
        parity,
    ))
}

/// Signs one credential.
pub async fn sign_credential<S>(
    domain: &AllowListDomain,
    auction_id: u64,
    user: Address,
    signer: &S,
) -> Result<Credential, SigningError>
where
    S: MessageSigner + ?Sized,
{
    let digest = credential_digest(domain, auction_id, user);
    let signature = signer.sign_message(digest.as_slice()).await?;

    Ok(Credential {
        address: user,
        auction_id,
        signature: split_signature(&signature),
    })
}

/// Recovers the address that issued `credential` under `domain`.
pub fn recover_issuer(
    domain: &AllowListDomain,
    credential: &Credential,
) -> Result<Address, SigningError> {
    let digest = credential_digest(domain, credential.auction_id, credential.address);
    let signature = join_signature(&credential.signature)?;
    signature
        .recover_address_from_msg(digest.as_slice())
        .map_err(|e| SigningError::InvalidSignature {
            reason: e.to_string(),
        })
}

/// Checks that `credential` was issued by `expected_signer` under `domain`.
pub fn verify_credential(
    domain: &AllowListDomain,
    credential: &Credential,
    expected_signer: Address,
) -> Result<bool, SigningError> {
    Ok(recover_issuer(domain, credential)? == expected_signer)
}

/// Metrics for observability.
#[derive(Debug, Default)]
pub struct SigningMetrics {
    pub credentials_signed_total: AtomicU64,
    pub signing_errors_total: AtomicU64,
}

/// Signs credentials for one domain with one signer capability.
pub struct CredentialSigner {
    domain: AllowListDomain,
    signer: Arc<dyn MessageSigner>,
    metrics: SigningMetrics,
}

impl CredentialSigner {
    pub fn new(domain: AllowListDomain, signer: Arc<dyn MessageSigner>) -> Self {
        Self {
            domain,
            signer,
            metrics: SigningMetrics::default(),
        }
    }

    pub fn domain(&self) -> &AllowListDomain {
        &self.domain
    }

    pub fn signer_address(&self) -> Address {
        self.signer.address()
    }

    /// Signs the credential of `user` for `auction_id`.
    pub async fn sign(&self, auction_id: u64, user: Address) -> Result<Credential, SigningError> {
        match sign_credential(&self.domain, auction_id, user, self.signer.as_ref()).await {
            Ok(credential) => {
                self.metrics
                    .credentials_signed_total
                    .fetch_add(1, Ordering::Relaxed);
                tracing::debug!(user = %user, auction_id, "Signed credential");
                Ok(credential)
            }
            Err(e) => {
                self.metrics
                    .signing_errors_total
                    .fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }

    /// Gets a snapshot of current metrics.
    pub fn metrics(&self) -> &SigningMetrics {
        &self.metrics
    }
}
