//! Data providers consumed by the evaluator
//!
//! The traits describe what the evaluator needs; [`EvmLaneProvider`] serves
//! them from a source chain over JSON-RPC:
//!
//! 1. `router.getOnRamp(destSelector)` -> on-ramp
//! 2. `onRamp.getPoolBySourceToken(destSelector, token)` -> token pool
//! 3. `pool.getCurrentOutboundRateLimiterState(destSelector)` -> bucket

use std::sync::Arc;

use async_trait::async_trait;
use evm_rpc_client::{queries, EvmClient};
use lanegate_core::{ChainConfig, ChainSelector, EvmAddress, Lane, ProtocolError};

use crate::state::{LaneRateLimits, RateLimitState, TokenBalance};
use crate::LaneError;

#[async_trait]
pub trait BalanceProvider: Send + Sync {
    async fn get_balance(
        &self,
        owner: &EvmAddress,
        token: &EvmAddress,
    ) -> Result<TokenBalance, LaneError>;
}

#[async_trait]
pub trait DecimalsProvider: Send + Sync {
    async fn get_decimals(&self, token: &EvmAddress) -> Result<u8, LaneError>;
}

#[async_trait]
pub trait RateLimitProvider: Send + Sync {
    async fn get_lane_rate_limit(&self, lane: &Lane) -> Result<RateLimitState, LaneError>;
}

/// Configured chains, looked up by name
#[derive(Debug, Clone)]
pub struct ChainRegistry {
    chains: Arc<Vec<ChainConfig>>,
}

impl ChainRegistry {
    pub fn new(chains: Vec<ChainConfig>) -> Self {
        Self {
            chains: Arc::new(chains),
        }
    }

    pub fn get(&self, name: &str) -> Result<&ChainConfig, ProtocolError> {
        self.chains
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ProtocolError::ChainNotConfigured {
                chain: name.to_string(),
            })
    }

    pub fn selector(&self, name: &str) -> Result<ChainSelector, ProtocolError> {
        self.get(name).map(|c| c.selector)
    }

    pub fn chains(&self) -> &[ChainConfig] {
        &self.chains
    }
}

/// Providers backed by one source chain's RPC endpoint
#[derive(Clone)]
pub struct EvmLaneProvider {
    client: EvmClient,
    registry: ChainRegistry,
}

impl EvmLaneProvider {
    pub fn new(client: EvmClient, registry: ChainRegistry) -> Self {
        Self { client, registry }
    }

    pub fn client(&self) -> &EvmClient {
        &self.client
    }

    fn chain(&self) -> &ChainConfig {
        self.client.chain()
    }

    /// Destination selector for a lane that starts on this provider's chain
    fn destination_selector(&self, lane: &Lane) -> Result<ChainSelector, ProtocolError> {
        if lane.source != self.chain().name {
            return Err(ProtocolError::ChainNotConfigured {
                chain: lane.source.clone(),
            });
        }
        self.registry.selector(&lane.destination)
    }

    fn unsupported(lane: &Lane) -> ProtocolError {
        ProtocolError::LaneNotSupported {
            source_chain: lane.source.clone(),
            destination_chain: lane.destination.clone(),
            token: lane.token.to_string(),
        }
    }

    /// Resolve the on-ramp and token pool serving a lane
    pub async fn resolve_pool(&self, lane: &Lane) -> Result<(EvmAddress, EvmAddress), LaneError> {
        let dest = self.destination_selector(lane)?;

        let on_ramp = queries::router_get_on_ramp(&self.client, &self.chain().router, dest).await?;
        if on_ramp.is_zero() {
            return Err(Self::unsupported(lane).into());
        }

        let pool = queries::on_ramp_get_pool(&self.client, &on_ramp, dest, &lane.token).await?;
        if pool.is_zero() {
            return Err(Self::unsupported(lane).into());
        }

        tracing::debug!(lane = %lane, on_ramp = %on_ramp, pool = %pool, "Resolved lane pool");
        Ok((on_ramp, pool))
    }

    /// Token bucket and lane-wide bucket
    pub async fn lane_rate_limits(&self, lane: &Lane) -> Result<LaneRateLimits, LaneError> {
        let dest = self.destination_selector(lane)?;
        let (on_ramp, pool) = self.resolve_pool(lane).await?;

        let (token, aggregate) = tokio::try_join!(
            queries::pool_outbound_rate_limiter_state(&self.client, &pool, dest),
            queries::on_ramp_rate_limiter_state(&self.client, &on_ramp),
        )?;

        Ok(LaneRateLimits {
            token: token.into(),
            aggregate: aggregate.into(),
        })
    }

    /// Whether the lane exists and has a pool for the token
    pub async fn is_token_supported(&self, lane: &Lane) -> Result<bool, LaneError> {
        match self.resolve_pool(lane).await {
            Ok(_) => Ok(true),
            Err(LaneError::Protocol(ProtocolError::LaneNotSupported { .. })) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Whether the router on this chain serves `destination` at all
    pub async fn is_chain_supported(&self, destination: &str) -> Result<bool, LaneError> {
        let dest = self.registry.selector(destination)?;
        Ok(queries::router_is_chain_supported(&self.client, &self.chain().router, dest).await?)
    }

    /// Allowance granted by `owner` to this chain's router
    pub async fn router_allowance(
        &self,
        owner: &EvmAddress,
        token: &EvmAddress,
    ) -> Result<u128, LaneError> {
        Ok(queries::erc20_allowance(&self.client, token, owner, &self.chain().router).await?)
    }

    pub async fn token_symbol(&self, token: &EvmAddress) -> Result<String, LaneError> {
        Ok(queries::erc20_symbol(&self.client, token).await?)
    }
}

#[async_trait]
impl BalanceProvider for EvmLaneProvider {
    async fn get_balance(
        &self,
        owner: &EvmAddress,
        token: &EvmAddress,
    ) -> Result<TokenBalance, LaneError> {
        let (value, decimals) = tokio::try_join!(
            queries::erc20_balance_of(&self.client, token, owner),
            queries::erc20_decimals(&self.client, token),
        )?;
        Ok(TokenBalance { value, decimals })
    }
}

#[async_trait]
impl DecimalsProvider for EvmLaneProvider {
    async fn get_decimals(&self, token: &EvmAddress) -> Result<u8, LaneError> {
        Ok(queries::erc20_decimals(&self.client, token).await?)
    }
}

#[async_trait]
impl RateLimitProvider for EvmLaneProvider {
    async fn get_lane_rate_limit(&self, lane: &Lane) -> Result<RateLimitState, LaneError> {
        let dest = self.destination_selector(lane)?;
        let (_, pool) = self.resolve_pool(lane).await?;
        let bucket = queries::pool_outbound_rate_limiter_state(&self.client, &pool, dest).await?;
        Ok(bucket.into())
    }
}
