//! End-to-end tests for credential issuance
//!
//! This test suite validates:
//! - Chunked signing, pinning and batch persistence against a mock pinning service
//! - Recovery of the issuer from every persisted credential
//! - Fail-fast behaviour when the pinning service rejects a credential
//! - Re-runs into an existing output directory

pub mod test_utils;

#[cfg(test)]
mod issuance_tests;

#[cfg(test)]
mod failure_tests;
