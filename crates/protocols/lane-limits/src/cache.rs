//! Short-lived cache for rate-limit snapshots

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lanegate_core::{EvmAddress, Lane};
use tokio::sync::RwLock;

use crate::provider::{BalanceProvider, DecimalsProvider, RateLimitProvider};
use crate::state::{RateLimitState, TokenBalance};
use crate::LaneError;

/// Rate-limit snapshots keyed by lane, reused for `ttl`
#[derive(Clone)]
pub struct RateLimitCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<Lane, (Instant, RateLimitState)>>>,
}

impl RateLimitCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get(&self, lane: &Lane) -> Option<RateLimitState> {
        let entries = self.entries.read().await;
        entries
            .get(lane)
            .filter(|(fetched_at, _)| fetched_at.elapsed() < self.ttl)
            .map(|(_, state)| *state)
    }

    pub async fn insert(&self, lane: Lane, state: RateLimitState) {
        let mut entries = self.entries.write().await;
        entries.retain(|_, (fetched_at, _)| fetched_at.elapsed() < self.ttl);
        entries.insert(lane, (Instant::now(), state));
    }

    pub async fn invalidate(&self, lane: &Lane) {
        self.entries.write().await.remove(lane);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Provider decorator that serves rate limits from a [`RateLimitCache`]
///
/// Balances and decimals pass straight through.
#[derive(Clone)]
pub struct CachedProvider<P> {
    inner: P,
    cache: RateLimitCache,
}

impl<P> CachedProvider<P> {
    pub fn new(inner: P, cache: RateLimitCache) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

#[async_trait]
impl<P: RateLimitProvider> RateLimitProvider for CachedProvider<P> {
    async fn get_lane_rate_limit(&self, lane: &Lane) -> Result<RateLimitState, LaneError> {
        if let Some(state) = self.cache.get(lane).await {
            tracing::trace!(lane = %lane, "Rate limit cache hit");
            return Ok(state);
        }

        let state = self.inner.get_lane_rate_limit(lane).await?;
        self.cache.insert(lane.clone(), state).await;
        Ok(state)
    }
}

#[async_trait]
impl<P: BalanceProvider> BalanceProvider for CachedProvider<P> {
    async fn get_balance(
        &self,
        owner: &EvmAddress,
        token: &EvmAddress,
    ) -> Result<TokenBalance, LaneError> {
        self.inner.get_balance(owner, token).await
    }
}

#[async_trait]
impl<P: DecimalsProvider> DecimalsProvider for CachedProvider<P> {
    async fn get_decimals(&self, token: &EvmAddress) -> Result<u8, LaneError> {
        self.inner.get_decimals(token).await
    }
}
