//! Fixed inputs and expected outputs for the credential digest.
//!
//! The digest vector was computed independently from the typed-data
//! definition and pins the byte layout of the domain separator and the
//! `(bytes32, address, uint256)` message encoding.

use alloy_primitives::{address, b256, Address, B256};

/// Fixed private key for test vectors.
///
/// ⚠️ WARNING: DO NOT USE IN PRODUCTION ⚠️
///
/// This is the first account of the public hardhat/anvil development
/// mnemonic. Anyone can sign with it.
pub const TEST_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Address of [`TEST_PRIVATE_KEY`].
pub const TEST_SIGNER_ADDRESS: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");

pub const TEST_CONTRACT: Address = address!("80b8c7b5a9bd2e8b7fa7d8e3c6a2e5d4f8c3c36b");

pub const TEST_USER: Address = address!("740a98f8f4fae0986fb3264fe4aacf94ac1ee96f");

/// Digest for (chain 5, [`TEST_CONTRACT`], auction 7, [`TEST_USER`]).
pub const TEST_DIGEST: B256 =
    b256!("4710d2975c3fd2dcb949cad9e46f137e47c00da5bfcd3900e47fa76f42ed20f5");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AllowListDomain;
    use crate::signing::credential_digest;

    #[test]
    fn test_vector_inputs_are_distinct() {
        assert_ne!(TEST_USER, TEST_CONTRACT);
        assert_ne!(TEST_USER, TEST_SIGNER_ADDRESS);
    }

    #[test]
    fn test_digest_vector_is_chain_bound() {
        let domain = AllowListDomain::build(5, TEST_CONTRACT);
        assert_eq!(credential_digest(&domain, 7, TEST_USER), TEST_DIGEST);

        let mainnet = AllowListDomain::build(1, TEST_CONTRACT);
        assert_ne!(credential_digest(&mainnet, 7, TEST_USER), TEST_DIGEST);
    }
}
