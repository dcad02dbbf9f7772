//! EIP-712 domain of the allow-list verifier.
//!
//! The name and version literals are part of every digest. Changing either
//! invalidates all credentials issued so far and must ship as a new version.

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::Eip712Domain;
use std::borrow::Cow;

/// `name` field of the domain.
pub const DOMAIN_NAME: &str = "AccessManager";

/// `version` field of the domain.
pub const DOMAIN_VERSION: &str = "v1";

/// Domain separation record binding credentials to one chain and one
/// verifying contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllowListDomain {
    pub name: &'static str,
    pub version: &'static str,
    pub chain_id: u64,
    pub verifying_contract: Address,
}

impl AllowListDomain {
    /// Builds the domain for a deployment. Pure and infallible.
    pub fn build(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            name: DOMAIN_NAME,
            version: DOMAIN_VERSION,
            chain_id,
            verifying_contract,
        }
    }

    pub fn to_eip712(&self) -> Eip712Domain {
        Eip712Domain::new(
            Some(Cow::Borrowed(self.name)),
            Some(Cow::Borrowed(self.version)),
            Some(U256::from(self.chain_id)),
            Some(self.verifying_contract),
            None,
        )
    }

    /// `hashStruct(EIP712Domain)`, the domain separator.
    pub fn separator(&self) -> B256 {
        self.to_eip712().hash_struct()
    }
}
