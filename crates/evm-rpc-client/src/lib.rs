//! evm-rpc-client: Read-only access to EVM chains
//!
//! Wraps an alloy HTTP provider bound to one configured chain. Every request
//! is bounded by a timeout and every failure is surfaced as an [`RpcError`];
//! no retries happen here.

pub mod contracts;
pub mod probe;
pub mod queries;

use std::time::Duration;

use alloy::primitives::Address;
use alloy::providers::{Provider, RootProvider};
use alloy::transports::{RpcError as TransportRpcError, TransportError};
use lanegate_core::{BlockNumber, ChainConfig, EvmAddress, RpcError};

pub use probe::{probe_endpoint, EndpointStatus};
pub use queries::TokenBucket;

/// Default timeout for RPC calls (15 seconds)
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Result type for RPC client operations
pub type Result<T> = std::result::Result<T, RpcError>;

/// RPC client bound to one chain
#[derive(Debug, Clone)]
pub struct EvmClient {
    provider: RootProvider,
    chain: ChainConfig,
    timeout: Duration,
}

impl EvmClient {
    /// Create a client for a configured chain
    pub fn new(chain: ChainConfig, timeout: Duration) -> Result<Self> {
        let url: reqwest::Url = chain.rpc_url.parse().map_err(|e| RpcError::Unreachable {
            url: format!("{}: {}", chain.rpc_url, e),
        })?;

        Ok(Self {
            provider: RootProvider::new_http(url),
            chain,
            timeout,
        })
    }

    /// Chain this client talks to
    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    /// Underlying provider, for building contract instances
    pub fn provider(&self) -> &RootProvider {
        &self.provider
    }

    /// Current chain id reported by the endpoint
    pub async fn chain_id(&self) -> Result<u64> {
        self.timed(async {
            self.provider
                .get_chain_id()
                .await
                .map_err(|e| self.transport_error(e))
        })
        .await
    }

    /// Latest block number
    pub async fn block_number(&self) -> Result<BlockNumber> {
        self.timed(async {
            self.provider
                .get_block_number()
                .await
                .map_err(|e| self.transport_error(e))
        })
        .await
    }

    /// Run a contract call under this client's timeout
    pub async fn timed<T>(&self, fut: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        timed_request(self.timeout, fut).await
    }

    /// Map a failed contract call
    pub fn contract_error(&self, err: alloy::contract::Error) -> RpcError {
        match err {
            alloy::contract::Error::TransportError(e) => self.transport_error(e),
            other => RpcError::ParseError(other.to_string()),
        }
    }

    fn transport_error(&self, err: TransportError) -> RpcError {
        match err {
            TransportRpcError::ErrorResp(payload) => RpcError::JsonRpc {
                code: payload.code,
                message: payload.message.to_string(),
            },
            TransportRpcError::Transport(kind) => RpcError::Unreachable {
                url: format!("{}: {}", self.chain.rpc_url, kind),
            },
            TransportRpcError::NullResp => RpcError::ApiError {
                message: format!("null response from {}", self.chain.rpc_url),
            },
            other => RpcError::ParseError(other.to_string()),
        }
    }
}

/// Convert to the alloy address type
pub fn to_alloy(address: &EvmAddress) -> Address {
    Address::from(*address.as_bytes())
}

/// Convert from the alloy address type
pub fn from_alloy(address: Address) -> EvmAddress {
    EvmAddress::from_bytes(address.0 .0)
}

/// Wrap an RPC future with a timeout
async fn timed_request<T>(
    timeout: Duration,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| RpcError::Timeout {
            secs: timeout.as_secs(),
        })?
}
