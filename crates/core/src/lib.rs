//! Core types for allow-list credential issuance.
//!
//! This crate holds everything that is shared between the signing,
//! publishing and persistence stages:
//!
//! - **Addresses**: parsing and validation of the operator's address list
//! - **Credentials and batches**: the signed output and its file format
//! - **Configuration**: file and environment based issuer settings
//! - **Networks**: the chain-id keyed table of known deployments
//! - **Logging**: `tracing` subscriber setup

pub mod address;
pub mod batch;
pub mod config;
pub mod deployment;
pub mod error;
pub mod logging;
pub mod network;

pub use address::{parse_address, parse_addresses, read_address_file};
pub use batch::{
    batch_file_name, Batch, BatchFile, Credential, CredentialSignature, SignatureEntry,
    ENCODED_SIGNATURE_LEN,
};
pub use config::{IssuerConfig, KeySource, Secret};
pub use error::{InputError, Result};
pub use network::Chain;

pub use alloy_primitives::Address;
