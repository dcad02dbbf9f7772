//! Cryptographic operations for allow-list credentials.
//!
//! This crate provides the signing side of credential issuance:
//!
//! - **Domain separation**: the EIP-712 domain binding credentials to one
//!   chain and one verifying contract
//! - **Digests**: `keccak256(abi.encode(domainSeparator, user, auctionId))`
//! - **Signing**: personal-message signatures through an abstract
//!   [`MessageSigner`] capability
//! - **Verification**: signer recovery for issued credentials
//!
//! # Security Principles
//!
//! - Key material is only held by [`MessageSigner`] implementations
//! - Secrets must never be logged
//! - Decoded key bytes are zeroized after use

pub mod domain;
pub mod signing;

#[cfg(test)]
mod test_vectors;

pub use domain::{AllowListDomain, DOMAIN_NAME, DOMAIN_VERSION};
pub use signing::{
    credential_digest, join_signature, recover_issuer, sign_credential, split_signature,
    verify_credential, CredentialSigner, LocalKeySigner, MessageSigner, SigningError,
    SigningMetrics,
};

pub use alloy_primitives::Signature;
