//! Wire format of the pinning request and its receipt.

use allowlist_core::Credential;
use serde::{Deserialize, Serialize};

/// Body of `POST /pinning/pinJSONToIPFS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRequest {
    pub pinata_options: PinOptions,
    pub pinata_metadata: PinMetadata,
    pub pinata_content: PinContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinOptions {
    pub cid_version: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinMetadata {
    pub name: String,
    pub keyvalues: PinKeyValues,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PinKeyValues {
    pub address: String,
    pub auction_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinContent {
    pub signature: String,
}

/// Deterministic content name: `{chainId}-{auctionId}-{address}`.
pub fn content_name(chain_id: u64, credential: &Credential) -> String {
    format!(
        "{}-{}-{}",
        chain_id,
        credential.auction_id,
        credential.address.to_checksum(None)
    )
}

impl PinRequest {
    pub fn for_credential(chain_id: u64, credential: &Credential, cid_version: u8) -> Self {
        Self {
            pinata_options: PinOptions { cid_version },
            pinata_metadata: PinMetadata {
                name: content_name(chain_id, credential),
                keyvalues: PinKeyValues {
                    address: credential.address.to_checksum(None),
                    auction_id: credential.auction_id.to_string(),
                },
            },
            pinata_content: PinContent {
                signature: credential.signature.encode_hex(),
            },
        }
    }
}

/// Acknowledgement of a pinned credential.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublishReceipt {
    /// Content identifier of the pinned record.
    pub ipfs_hash: String,
    #[serde(default)]
    pub pin_size: u64,
    #[serde(default)]
    pub timestamp: String,
}
