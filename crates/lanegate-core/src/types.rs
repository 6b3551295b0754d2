//! Core type definitions for Lanegate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// EVM account or contract address (20 bytes)
///
/// Stored as raw bytes; displayed as lowercase `0x`-prefixed hex.
/// Parsing accepts any letter case and does not verify EIP-55 checksums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EvmAddress([u8; 20]);

impl EvmAddress {
    pub const ZERO: EvmAddress = EvmAddress([0u8; 20]);

    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for EvmAddress {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ProtocolError::InvalidAddress {
            address: s.to_string(),
        };

        let stripped = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        if stripped.len() != 40 {
            return Err(invalid());
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(stripped, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }
}

impl TryFrom<String> for EvmAddress {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EvmAddress> for String {
    fn from(addr: EvmAddress) -> Self {
        addr.to_string()
    }
}

impl fmt::Display for EvmAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Bridge router chain selector (64-bit chain identifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainSelector(pub u64);

impl ChainSelector {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cross-chain transfer path: (source chain, destination chain, token)
///
/// Chains are referred to by their configured names; the token is the
/// source-chain token contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub source: String,
    pub destination: String,
    pub token: EvmAddress,
}

impl Lane {
    pub fn new(source: impl Into<String>, destination: impl Into<String>, token: EvmAddress) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            token,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.source, self.destination, self.token)
    }
}

/// Token amount in base units (smallest indivisible unit)
pub type BaseUnits = u128;

/// Block number
pub type BlockNumber = u64;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_and_display() {
        let addr: EvmAddress = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD08".parse().unwrap();
        assert_eq!(addr.to_string(), "0x742d35cc6634c0532925a3b844bc9e7595f2bd08");
        assert!(!addr.is_zero());
        assert!(EvmAddress::ZERO.is_zero());
    }

    #[test]
    fn test_address_rejects_bad_input() {
        assert!("742d35Cc6634C0532925a3b844Bc9e7595f2bD08".parse::<EvmAddress>().is_err());
        assert!("0x742d35".parse::<EvmAddress>().is_err());
        assert!("0xZZ2d35Cc6634C0532925a3b844Bc9e7595f2bD08".parse::<EvmAddress>().is_err());
    }

    #[test]
    fn test_address_serde() {
        let json = "\"0x0000000000000000000000000000000000000001\"";
        let addr: EvmAddress = serde_json::from_str(json).unwrap();
        assert_eq!(addr.as_bytes()[19], 1);
        assert_eq!(serde_json::to_string(&addr).unwrap(), json);

        assert!(serde_json::from_str::<EvmAddress>("\"nope\"").is_err());
    }

    #[test]
    fn test_lane_display() {
        let lane = Lane::new("sepolia", "fuji", EvmAddress::ZERO);
        assert_eq!(
            lane.to_string(),
            "sepolia -> fuji (0x0000000000000000000000000000000000000000)"
        );
    }
}
