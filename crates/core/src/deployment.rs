//! Lookup of deployed contract addresses from hardhat-deploy artifacts.
//!
//! Artifacts live at `<deployments_dir>/<network>/<ContractName>.json` and
//! carry the deployed `address` next to the ABI, which is ignored here.

use crate::address::parse_address;
use crate::error::{InputError, Result};
use alloy_primitives::Address;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the allow-list verifier deployment.
pub const ALLOW_LIST_CONTRACT_NAME: &str = "AllowListOffChainManaged";

#[derive(Debug, Deserialize)]
struct DeploymentArtifact {
    address: String,
}

/// Path of a deployment artifact.
pub fn artifact_path(deployments_dir: &Path, network: &str, contract: &str) -> PathBuf {
    deployments_dir
        .join(network)
        .join(format!("{}.json", contract))
}

/// Reads the deployed address of `contract` on `network`.
pub fn deployed_address(deployments_dir: &Path, network: &str, contract: &str) -> Result<Address> {
    let path = artifact_path(deployments_dir, network, contract);
    let raw = std::fs::read_to_string(&path).map_err(|e| InputError::InvalidParameter {
        name: "allow_list.deployments_dir",
        reason: format!("cannot read {}: {}", path.display(), e),
    })?;
    let artifact: DeploymentArtifact = serde_json::from_str(&raw)?;
    parse_address(0, &artifact.address)
}
