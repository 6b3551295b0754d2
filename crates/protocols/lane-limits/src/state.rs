//! Lane state snapshots and transfer inputs

use evm_rpc_client::TokenBucket;
use lanegate_core::{BaseUnits, EvmAddress, Lane};
use serde::{Deserialize, Serialize};

/// Token bucket snapshot for one lane
///
/// Read-only: refreshed by fetching again, never advanced locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitState {
    /// Currently available amount (base units)
    pub tokens: BaseUnits,
    /// Maximum bucket size, i.e. the largest single transfer (base units)
    pub capacity: BaseUnits,
    /// Refill per second (base units)
    pub rate: BaseUnits,
    /// Disabled buckets do not limit transfers
    pub is_enabled: bool,
    /// Unix time of the last on-chain refill
    pub last_updated: u32,
}

impl From<TokenBucket> for RateLimitState {
    fn from(bucket: TokenBucket) -> Self {
        Self {
            tokens: bucket.tokens,
            capacity: bucket.capacity,
            rate: bucket.rate,
            is_enabled: bucket.is_enabled,
            last_updated: bucket.last_updated,
        }
    }
}

/// Both limiters that apply to a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneRateLimits {
    /// Per-token bucket of the source pool (token base units)
    pub token: RateLimitState,
    /// Lane-wide bucket of the on-ramp (USD value, 18 decimals)
    pub aggregate: RateLimitState,
}

/// Wallet balance of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub value: BaseUnits,
    pub decimals: u8,
}

/// A transfer the user is about to make
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Human-readable amount, e.g. "1.25"
    pub amount: String,
    /// On-chain decimals of the token
    pub token_decimals: u8,
    pub source_chain: String,
    pub destination_chain: String,
    pub token_address: EvmAddress,
}

impl TransferRequest {
    pub fn new(lane: &Lane, amount: impl Into<String>, token_decimals: u8) -> Self {
        Self {
            amount: amount.into(),
            token_decimals,
            source_chain: lane.source.clone(),
            destination_chain: lane.destination.clone(),
            token_address: lane.token,
        }
    }

    pub fn lane(&self) -> Lane {
        Lane::new(
            self.source_chain.clone(),
            self.destination_chain.clone(),
            self.token_address,
        )
    }
}
