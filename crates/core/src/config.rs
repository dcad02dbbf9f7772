//! Configuration management for the signature issuer.
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables (a `.env` file in the working directory is
//! honoured). The resolved [`IssuerConfig`] is passed explicitly to the
//! components that need it; nothing reads the environment afterwards.

use crate::deployment::{deployed_address, ALLOW_LIST_CONTRACT_NAME};
use crate::error::{InputError, Result};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use zeroize::Zeroize;

/// Default Pinata endpoint for JSON pinning.
pub const DEFAULT_PIN_ENDPOINT: &str = "https://api.pinata.cloud/pinning/pinJSONToIPFS";

/// Publicly known development mnemonic, used when no key is configured.
pub const DEVELOPMENT_MNEMONIC: &str =
    "candy maple cake sugar pudding cream honey rich smooth crumble sweet treat";

/// Number of addresses per batch file.
pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// Secret string that is redacted in `Debug` output and zeroized on drop.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuerConfig {
    pub publish: PublishConfig,
    pub signer: SignerConfig,
    pub chain: ChainConfig,
    pub allow_list: AllowListConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub endpoint: String,
    pub jwt: Option<Secret>,
    pub cid_version: u8,
    pub timeout_secs: u64,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PIN_ENDPOINT.to_string(),
            jwt: None,
            cid_version: 1,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Hex encoded secp256k1 private key.
    pub private_key: Option<Secret>,
    /// BIP-39 phrase; account index 0 is used.
    pub mnemonic: Option<Secret>,
}

/// Where the signing key comes from, in order of precedence.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum KeySource<'a> {
    PrivateKey(&'a str),
    Mnemonic(&'a str),
    DevelopmentMnemonic,
}

impl fmt::Debug for KeySource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::PrivateKey(_) => f.write_str("PrivateKey(***)"),
            KeySource::Mnemonic(_) => f.write_str("Mnemonic(***)"),
            KeySource::DevelopmentMnemonic => f.write_str("DevelopmentMnemonic"),
        }
    }
}

impl SignerConfig {
    pub fn key_source(&self) -> KeySource<'_> {
        if let Some(key) = &self.private_key {
            KeySource::PrivateKey(key.expose())
        } else if let Some(phrase) = &self.mnemonic {
            KeySource::Mnemonic(phrase.expose())
        } else {
            KeySource::DevelopmentMnemonic
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub rpc_url: Option<String>,
    pub chain_id: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowListConfig {
    /// Verifying contract address; takes precedence over the artifact lookup.
    pub contract: Option<String>,
    pub deployments_dir: Option<PathBuf>,
    pub network: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub chunk_size: usize,
    /// In-flight sign+publish operations per chunk. `1` is strictly sequential.
    pub concurrency: usize,
    pub output_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            concurrency: 1,
            output_dir: PathBuf::from("./signatures"),
        }
    }
}

impl IssuerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the optional file, applies `.env` and process environment
    /// overrides and validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(dotenv) = dotenvy::dotenv() {
            tracing::debug!(path = %dotenv.display(), "Loaded .env file");
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(jwt) = lookup("PINATA_JWT") {
            self.publish.jwt = Some(Secret::new(jwt));
        }
        if let Some(endpoint) = lookup("PINATA_ENDPOINT") {
            self.publish.endpoint = endpoint;
        }
        if let Some(pk) = lookup("PK") {
            self.signer.private_key = Some(Secret::new(pk));
        }
        if let Some(mnemonic) = lookup("MNEMONIC") {
            self.signer.mnemonic = Some(Secret::new(mnemonic));
        }
        if let Some(rpc_url) = lookup("RPC_URL") {
            self.chain.rpc_url = Some(rpc_url);
        }
        if let Some(chain_id) = lookup("CHAIN_ID") {
            let parsed = chain_id
                .trim()
                .parse()
                .map_err(|_| InputError::InvalidParameter {
                    name: "CHAIN_ID",
                    reason: format!("'{}' is not an unsigned integer", chain_id),
                })?;
            self.chain.chain_id = Some(parsed);
        }
        if let Some(contract) = lookup("ALLOW_LIST_CONTRACT") {
            self.allow_list.contract = Some(contract);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.chunk_size == 0 {
            return Err(InputError::InvalidParameter {
                name: "pipeline.chunk_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.pipeline.concurrency == 0 {
            return Err(InputError::InvalidParameter {
                name: "pipeline.concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.publish.endpoint.trim().is_empty() {
            return Err(InputError::MissingParameter("publish.endpoint"));
        }
        Ok(())
    }

    /// Bearer credential for the pinning service.
    pub fn publish_jwt(&self) -> Result<&Secret> {
        self.publish
            .jwt
            .as_ref()
            .filter(|jwt| !jwt.expose().trim().is_empty())
            .ok_or(InputError::MissingParameter("PINATA_JWT"))
    }

    /// Resolves the verifying contract of the allow-list domain.
    pub fn allow_list_contract(&self) -> Result<Address> {
        if let Some(contract) = &self.allow_list.contract {
            return crate::address::parse_address(0, contract).map_err(|e| {
                InputError::InvalidParameter {
                    name: "allow_list.contract",
                    reason: e.to_string(),
                }
            });
        }

        match (&self.allow_list.deployments_dir, &self.allow_list.network) {
            (Some(dir), Some(network)) => deployed_address(dir, network, ALLOW_LIST_CONTRACT_NAME),
            _ => Err(InputError::MissingParameter("allow_list.contract")),
        }
    }
}
