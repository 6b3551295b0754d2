//! Application state shared across API handlers

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use evm_rpc_client::EvmClient;
use lane_limits::{CachedProvider, ChainRegistry, EvmLaneProvider, LaneError, RateLimitCache};
use lanegate_core::AppConfig;
use tokio::sync::RwLock;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    clients: RwLock<HashMap<String, EvmClient>>,
    rate_limits: RateLimitCache,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        let ttl = Duration::from_secs(config.rate_limit_ttl_secs);
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                clients: RwLock::new(HashMap::new()),
                rate_limits: RateLimitCache::new(ttl),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    pub async fn registry(&self) -> ChainRegistry {
        ChainRegistry::new(self.inner.config.read().await.chains.clone())
    }

    /// Get or create the RPC client for a configured chain
    pub async fn client(&self, chain: &str) -> Result<EvmClient, LaneError> {
        {
            let clients = self.inner.clients.read().await;
            if let Some(client) = clients.get(chain) {
                return Ok(client.clone());
            }
        }

        let config = self.inner.config.read().await;
        let chain_config = ChainRegistry::new(config.chains.clone()).get(chain)?.clone();
        let timeout = Duration::from_secs(config.rpc_timeout_secs);
        drop(config);

        let mut clients = self.inner.clients.write().await;

        // Another request may have created it meanwhile
        if let Some(client) = clients.get(chain) {
            return Ok(client.clone());
        }

        tracing::info!(chain, url = %chain_config.rpc_url, "Creating RPC client");
        let client = EvmClient::new(chain_config, timeout)?;
        clients.insert(chain.to_string(), client.clone());
        Ok(client)
    }

    /// Lane provider for lanes starting on `source`
    pub async fn provider(&self, source: &str) -> Result<EvmLaneProvider, LaneError> {
        let client = self.client(source).await?;
        Ok(EvmLaneProvider::new(client, self.registry().await))
    }

    /// Lane provider whose token buckets go through the shared cache
    pub async fn cached_provider(
        &self,
        source: &str,
    ) -> Result<CachedProvider<EvmLaneProvider>, LaneError> {
        let provider = self.provider(source).await?;
        Ok(CachedProvider::new(provider, self.inner.rate_limits.clone()))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
