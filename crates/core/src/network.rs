//! Known EVM networks keyed by chain id.

use alloy_primitives::{address, Address};
use std::fmt;

/// Networks the auction tooling has deployments on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chain {
    Mainnet,
    Rinkeby,
    Goerli,
    BscMainnet,
    BscTestnet,
    Gnosis,
    Polygon,
    ZkSyncTestnet,
    ZkSync,
    Base,
    Chiado,
    Arbitrum,
    AvalancheFuji,
    Avalanche,
    Mumbai,
    BaseGoerli,
    Sepolia,
}

impl Chain {
    pub const ALL: [Chain; 17] = [
        Chain::Mainnet,
        Chain::Rinkeby,
        Chain::Goerli,
        Chain::BscMainnet,
        Chain::BscTestnet,
        Chain::Gnosis,
        Chain::Polygon,
        Chain::ZkSyncTestnet,
        Chain::ZkSync,
        Chain::Base,
        Chain::Chiado,
        Chain::Arbitrum,
        Chain::AvalancheFuji,
        Chain::Avalanche,
        Chain::Mumbai,
        Chain::BaseGoerli,
        Chain::Sepolia,
    ];

    pub fn id(self) -> u64 {
        match self {
            Chain::Mainnet => 1,
            Chain::Rinkeby => 4,
            Chain::Goerli => 5,
            Chain::BscMainnet => 56,
            Chain::BscTestnet => 97,
            Chain::Gnosis => 100,
            Chain::Polygon => 137,
            Chain::ZkSyncTestnet => 280,
            Chain::ZkSync => 324,
            Chain::Base => 8453,
            Chain::Chiado => 10200,
            Chain::Arbitrum => 42161,
            Chain::AvalancheFuji => 43113,
            Chain::Avalanche => 43114,
            Chain::Mumbai => 80001,
            Chain::BaseGoerli => 84531,
            Chain::Sepolia => 11155111,
        }
    }

    /// Looks up a chain id; unknown ids yield `None`.
    pub fn from_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|chain| chain.id() == chain_id)
    }

    pub fn name(self) -> &'static str {
        match self {
            Chain::Mainnet => "mainnet",
            Chain::Rinkeby => "rinkeby",
            Chain::Goerli => "goerli",
            Chain::BscMainnet => "binancesmartchain",
            Chain::BscTestnet => "bsctestnet",
            Chain::Gnosis => "xdai",
            Chain::Polygon => "polygon",
            Chain::ZkSyncTestnet => "zksynctestnet",
            Chain::ZkSync => "zksync",
            Chain::Base => "base",
            Chain::Chiado => "chiado",
            Chain::Arbitrum => "arbitrum",
            Chain::AvalancheFuji => "fuji",
            Chain::Avalanche => "avax",
            Chain::Mumbai => "mumbai",
            Chain::BaseGoerli => "basegoerli",
            Chain::Sepolia => "sepolia",
        }
    }

    /// Wrapped native asset (WETH, WMATIC, WAVAX, ...) of the chain.
    pub fn wrapped_native_token(self) -> Address {
        match self {
            Chain::Mainnet => address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
            Chain::Rinkeby => address!("c778417e063141139fce010982780140aa0cd5ab"),
            Chain::Goerli => address!("60d4db9b534ef9260a88b0bed6c486fe13e604fc"),
            Chain::BscMainnet => address!("bb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c"),
            Chain::BscTestnet => address!("ae13d989dac2f0debff460ac112a837c89baa7cd"),
            Chain::Gnosis => address!("e91d153e0b41518a2ce8dd3d7944fa863463a97d"),
            Chain::Polygon => address!("0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"),
            Chain::ZkSyncTestnet => address!("20b28b1e4665fff290650586ad76e977eab90c5d"),
            Chain::ZkSync => address!("8ebe4a94740515945ad826238fc4d56c6b8b0e60"),
            Chain::Base | Chain::BaseGoerli => {
                address!("4200000000000000000000000000000000000006")
            }
            Chain::Chiado => address!("014a442480dbad767b7615e55e271799889fa1a7"),
            Chain::Arbitrum => address!("82af49447d8a07e3bd95bd0d56f35241523fbab1"),
            Chain::AvalancheFuji => address!("d9d01a9f7c810ec035c0e42cb9e80ef44d7f8692"),
            Chain::Avalanche => address!("b31f66aa3c1e785363f0875a1b74e27b85fd66c7"),
            Chain::Mumbai => address!("a6fa4fb5f76172d178d61b04b0ecd319c5d1c0aa"),
            Chain::Sepolia => address!("d0df82de051244f04bff3a8bb1f62e1cd39eed92"),
        }
    }

    pub fn is_avalanche(self) -> bool {
        matches!(self, Chain::AvalancheFuji | Chain::Avalanche)
    }
}

impl TryFrom<u64> for Chain {
    type Error = u64;

    fn try_from(chain_id: u64) -> Result<Self, Self::Error> {
        Self::from_id(chain_id).ok_or(chain_id)
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}
