//! Address list parsing.
//!
//! The operator supplies a comma separated list of addresses. Every token is
//! trimmed and decoded into a 20-byte [`Address`]; a single malformed token
//! rejects the whole list. Order is preserved and duplicates are kept, so
//! a duplicated address yields a duplicated credential downstream.

use crate::error::{InputError, Result};
use alloy_primitives::Address;
use std::path::Path;

/// Length of an address in hex characters, without the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Parses a comma separated address list.
pub fn parse_addresses(raw: &str) -> Result<Vec<Address>> {
    if raw.trim().is_empty() {
        return Err(InputError::EmptyAddressList);
    }

    raw.split(',')
        .enumerate()
        .map(|(position, token)| parse_address(position, token))
        .collect()
}

/// Reads and parses an address list file.
pub fn read_address_file<P: AsRef<Path>>(path: P) -> Result<Vec<Address>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let addresses = parse_addresses(&raw)?;
    tracing::debug!(
        path = %path.as_ref().display(),
        count = addresses.len(),
        "Loaded address list"
    );
    Ok(addresses)
}

/// Decodes a single token. `position` is only used for error reporting.
pub fn parse_address(position: usize, token: &str) -> Result<Address> {
    let trimmed = token.trim();
    let invalid = |reason: String| InputError::InvalidAddress {
        position,
        token: trimmed.to_string(),
        reason,
    };

    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.len() != ADDRESS_HEX_LEN {
        return Err(invalid(format!(
            "expected {} hex characters, found {}",
            ADDRESS_HEX_LEN,
            digits.len()
        )));
    }

    let bytes = hex::decode(digits).map_err(|e| invalid(e.to_string()))?;
    Ok(Address::from_slice(&bytes))
}
