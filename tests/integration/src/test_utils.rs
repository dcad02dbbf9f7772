//! Test utilities for end-to-end issuance tests

use allowlist_core::config::PublishConfig;
use allowlist_core::{parse_address, Address, Secret};
use allowlist_crypto::{AllowListDomain, LocalKeySigner, MessageSigner};
use allowlist_publish::PinataPublisher;
use httpmock::MockServer;
use signature_issuer::{BatchWriter, Pipeline, PipelineSettings};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Hardhat development account #0.
pub const ISSUER_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const ISSUER_ADDRESS: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

pub const ALLOW_LIST_CONTRACT: &str = "0x80b8c7b5a9bd2e8b7fa7d8e3c6a2e5d4f8c3c36b";
pub const CHAIN_ID: u64 = 5;
pub const AUCTION_ID: u64 = 7;
pub const JWT: &str = "integration-jwt";

pub const PIN_PATH: &str = "/pinning/pinJSONToIPFS";

/// Initialize tracing once for the whole test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn address(raw: &str) -> Address {
    parse_address(0, raw).unwrap()
}

pub fn issuer_address() -> Address {
    address(ISSUER_ADDRESS)
}

/// Distinct non-zero test users, `0x0101..01` upwards.
pub fn users(n: u8) -> Vec<Address> {
    (1..=n).map(Address::repeat_byte).collect()
}

/// Writes `addresses` as the operator's comma separated list file.
pub fn write_address_file(dir: &Path, addresses: &[Address]) -> PathBuf {
    let raw = addresses
        .iter()
        .map(|a| a.to_checksum(None))
        .collect::<Vec<_>>()
        .join(",");
    let path = dir.join("addresses.txt");
    std::fs::write(&path, raw).unwrap();
    path
}

pub fn domain() -> AllowListDomain {
    AllowListDomain::build(CHAIN_ID, address(ALLOW_LIST_CONTRACT))
}

/// Pinning service receipt as returned by Pinata.
pub fn receipt_body(cid: &str) -> serde_json::Value {
    serde_json::json!({
        "IpfsHash": cid,
        "PinSize": 120,
        "Timestamp": "2024-01-01T00:00:00.000Z"
    })
}

/// Pipeline signing with [`ISSUER_KEY`] and pinning to `server`.
pub fn pipeline(server: &MockServer, output_dir: &Path, settings: PipelineSettings) -> Pipeline {
    let signer = LocalKeySigner::from_private_key(ISSUER_KEY).unwrap();
    assert_eq!(signer.address(), issuer_address());

    let config = PublishConfig {
        endpoint: server.url(PIN_PATH),
        timeout_secs: 5,
        ..PublishConfig::default()
    };
    let publisher = PinataPublisher::new(&config, Secret::new(JWT)).unwrap();

    Pipeline::new(
        domain(),
        Arc::new(signer),
        Arc::new(publisher),
        BatchWriter::new(output_dir),
        settings,
    )
}
