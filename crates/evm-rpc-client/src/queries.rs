//! Typed contract reads
//!
//! ERC-20 metadata/balances and the bridge contracts involved in a lane:
//! router -> on-ramp -> token pool. Each function is one `eth_call`.

use alloy::primitives::U256;
use lanegate_core::{ChainSelector, EvmAddress, RpcError};
use serde::{Deserialize, Serialize};

use crate::contracts::{IOnRamp, IRouter, ITokenPool, RateLimiterBucket, IERC20};
use crate::{from_alloy, to_alloy, EvmClient, Result};

/// On-chain token bucket state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBucket {
    pub tokens: u128,
    pub last_updated: u32,
    pub is_enabled: bool,
    pub capacity: u128,
    pub rate: u128,
}

impl From<RateLimiterBucket> for TokenBucket {
    fn from(bucket: RateLimiterBucket) -> Self {
        Self {
            tokens: bucket.tokens,
            last_updated: bucket.lastUpdated,
            is_enabled: bucket.isEnabled,
            capacity: bucket.capacity,
            rate: bucket.rate,
        }
    }
}

/// Narrow a uint256 amount to base units
fn to_u128(value: U256) -> Result<u128> {
    u128::try_from(value)
        .map_err(|_| RpcError::ParseError(format!("amount {} does not fit in 128 bits", value)))
}

// =============================================================================
// ERC-20
// =============================================================================

pub async fn erc20_balance_of(
    client: &EvmClient,
    token: &EvmAddress,
    owner: &EvmAddress,
) -> Result<u128> {
    let contract = IERC20::new(to_alloy(token), client.provider());
    let balance = client
        .timed(async {
            contract
                .balanceOf(to_alloy(owner))
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await?;
    to_u128(balance)
}

pub async fn erc20_decimals(client: &EvmClient, token: &EvmAddress) -> Result<u8> {
    let contract = IERC20::new(to_alloy(token), client.provider());
    client
        .timed(async {
            contract
                .decimals()
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await
}

pub async fn erc20_symbol(client: &EvmClient, token: &EvmAddress) -> Result<String> {
    let contract = IERC20::new(to_alloy(token), client.provider());
    client
        .timed(async {
            contract
                .symbol()
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await
}

pub async fn erc20_allowance(
    client: &EvmClient,
    token: &EvmAddress,
    owner: &EvmAddress,
    spender: &EvmAddress,
) -> Result<u128> {
    let contract = IERC20::new(to_alloy(token), client.provider());
    let allowance = client
        .timed(async {
            contract
                .allowance(to_alloy(owner), to_alloy(spender))
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await?;
    to_u128(allowance)
}

// =============================================================================
// Router
// =============================================================================

/// On-ramp serving `dest`, or the zero address if the lane does not exist
pub async fn router_get_on_ramp(
    client: &EvmClient,
    router: &EvmAddress,
    dest: ChainSelector,
) -> Result<EvmAddress> {
    let contract = IRouter::new(to_alloy(router), client.provider());
    let on_ramp = client
        .timed(async {
            contract
                .getOnRamp(dest.as_u64())
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await?;
    Ok(from_alloy(on_ramp))
}

pub async fn router_is_chain_supported(
    client: &EvmClient,
    router: &EvmAddress,
    dest: ChainSelector,
) -> Result<bool> {
    let contract = IRouter::new(to_alloy(router), client.provider());
    client
        .timed(async {
            contract
                .isChainSupported(dest.as_u64())
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await
}

// =============================================================================
// On-ramp
// =============================================================================

/// Token pool for `token` on the lane to `dest`, or zero if unsupported
pub async fn on_ramp_get_pool(
    client: &EvmClient,
    on_ramp: &EvmAddress,
    dest: ChainSelector,
    token: &EvmAddress,
) -> Result<EvmAddress> {
    let contract = IOnRamp::new(to_alloy(on_ramp), client.provider());
    let pool = client
        .timed(async {
            contract
                .getPoolBySourceToken(dest.as_u64(), to_alloy(token))
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await?;
    Ok(from_alloy(pool))
}

/// Aggregate (all tokens, USD-denominated) limiter of the lane
pub async fn on_ramp_rate_limiter_state(
    client: &EvmClient,
    on_ramp: &EvmAddress,
) -> Result<TokenBucket> {
    let contract = IOnRamp::new(to_alloy(on_ramp), client.provider());
    let bucket = client
        .timed(async {
            contract
                .currentRateLimiterState()
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await?;
    Ok(bucket.into())
}

// =============================================================================
// Token pool
// =============================================================================

/// Per-token outbound limiter of `pool` towards `remote`
pub async fn pool_outbound_rate_limiter_state(
    client: &EvmClient,
    pool: &EvmAddress,
    remote: ChainSelector,
) -> Result<TokenBucket> {
    let contract = ITokenPool::new(to_alloy(pool), client.provider());
    let bucket = client
        .timed(async {
            contract
                .getCurrentOutboundRateLimiterState(remote.as_u64())
                .call()
                .await
                .map_err(|e| client.contract_error(e))
        })
        .await?;
    Ok(bucket.into())
}
