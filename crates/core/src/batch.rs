//! Credential and batch data model.
//!
//! A [`Credential`] is the signed attestation that one address may take part
//! in one auction. Credentials are grouped into a [`Batch`] per chunk of the
//! input list, and each batch is persisted as a [`BatchFile`].

use crate::error::{InputError, Result};
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Length of the ABI encoded `(uint8 v, bytes32 r, bytes32 s)` tuple.
pub const ENCODED_SIGNATURE_LEN: usize = 96;

/// Recoverable secp256k1 signature split into its on-chain components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CredentialSignature {
    /// Recovery id in the legacy 27/28 form.
    pub v: u8,
    pub r: B256,
    pub s: B256,
}

impl CredentialSignature {
    /// ABI encodes the signature as `(uint8, bytes32, bytes32)`.
    ///
    /// `v` occupies the last byte of the first word; the contract decodes
    /// the blob with `abi.decode(sig, (uint8, bytes32, bytes32))`.
    pub fn encode(&self) -> [u8; ENCODED_SIGNATURE_LEN] {
        let mut out = [0u8; ENCODED_SIGNATURE_LEN];
        out[31] = self.v;
        out[32..64].copy_from_slice(self.r.as_slice());
        out[64..96].copy_from_slice(self.s.as_slice());
        out
    }

    /// `0x` prefixed hex of [`CredentialSignature::encode`].
    pub fn encode_hex(&self) -> String {
        format!("0x{}", hex::encode(self.encode()))
    }

    /// Decodes a blob produced by [`CredentialSignature::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ENCODED_SIGNATURE_LEN {
            return Err(InputError::InvalidParameter {
                name: "signature",
                reason: format!(
                    "expected {} bytes, found {}",
                    ENCODED_SIGNATURE_LEN,
                    bytes.len()
                ),
            });
        }
        if bytes[..31].iter().any(|b| *b != 0) {
            return Err(InputError::InvalidParameter {
                name: "signature",
                reason: "v word is not a uint8".to_string(),
            });
        }

        Ok(Self {
            v: bytes[31],
            r: B256::from_slice(&bytes[32..64]),
            s: B256::from_slice(&bytes[64..96]),
        })
    }

    /// Decodes the `0x` prefixed hex form.
    pub fn decode_hex(encoded: &str) -> Result<Self> {
        let digits = encoded.strip_prefix("0x").unwrap_or(encoded);
        let bytes = hex::decode(digits).map_err(|e| InputError::InvalidParameter {
            name: "signature",
            reason: e.to_string(),
        })?;
        Self::decode(&bytes)
    }
}

/// Signed attestation that `address` is allow-listed for `auction_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub address: Address,
    pub auction_id: u64,
    pub signature: CredentialSignature,
}

/// Credentials for one chunk of the address list, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Zero-based position of the chunk in the address list.
    pub index: usize,
    pub auction_id: u64,
    pub chain_id: u64,
    pub allow_list_contract: Address,
    pub credentials: Vec<Credential>,
}

impl Batch {
    /// Artifact name for this batch: `signatures-{index}.json`.
    pub fn file_name(&self) -> String {
        batch_file_name(self.index)
    }

    /// Converts the batch into its persisted JSON shape.
    pub fn to_file(&self) -> BatchFile {
        BatchFile {
            auction_id: self.auction_id,
            chain_id: self.chain_id,
            allow_list_contract: self.allow_list_contract.to_checksum(None),
            signatures: self
                .credentials
                .iter()
                .map(|credential| SignatureEntry {
                    user: credential.address.to_checksum(None),
                    signature: credential.signature.encode_hex(),
                })
                .collect(),
        }
    }
}

/// File name of the batch with the given index.
pub fn batch_file_name(index: usize) -> String {
    format!("signatures-{}.json", index)
}

/// On-disk representation of a [`Batch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFile {
    pub auction_id: u64,
    pub chain_id: u64,
    pub allow_list_contract: String,
    pub signatures: Vec<SignatureEntry>,
}

/// One `{user, signature}` pair of a batch file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureEntry {
    pub user: String,
    pub signature: String,
}

impl BatchFile {
    /// Rebuilds the typed batch. The index is not part of the file and is
    /// supplied by the caller.
    pub fn into_batch(self, index: usize) -> Result<Batch> {
        let allow_list_contract = crate::address::parse_address(0, &self.allow_list_contract)?;
        let credentials = self
            .signatures
            .iter()
            .enumerate()
            .map(|(position, entry)| {
                Ok(Credential {
                    address: crate::address::parse_address(position, &entry.user)?,
                    auction_id: self.auction_id,
                    signature: CredentialSignature::decode_hex(&entry.signature)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Batch {
            index,
            auction_id: self.auction_id,
            chain_id: self.chain_id,
            allow_list_contract,
            credentials,
        })
    }
}
