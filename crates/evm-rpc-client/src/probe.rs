//! Endpoint probing
//!
//! Checks that an RPC endpoint is reachable and serves the chain it is
//! configured for.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::EvmClient;

/// Result of probing a chain's RPC endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointStatus {
    pub chain: String,
    /// Endpoint answered `eth_blockNumber`
    pub is_online: bool,
    /// Chain id reported by the endpoint
    pub chain_id: Option<u64>,
    /// Reported chain id equals the configured one
    pub chain_id_matches: bool,
    pub block_number: Option<u64>,
    pub latency_ms: u64,
}

impl EndpointStatus {
    /// Online and serving the expected chain
    pub fn is_usable(&self) -> bool {
        self.is_online && self.chain_id_matches
    }
}

/// Probe an endpoint. Never fails; problems are reflected in the status.
pub async fn probe_endpoint(client: &EvmClient) -> EndpointStatus {
    let start = Instant::now();
    let chain = client.chain().name.clone();
    let expected_id = client.chain().chain_id;

    let block_number = match client.block_number().await {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(chain = %chain, "RPC endpoint offline: {}", e);
            return EndpointStatus {
                chain,
                is_online: false,
                chain_id: None,
                chain_id_matches: false,
                block_number: None,
                latency_ms: start.elapsed().as_millis() as u64,
            };
        }
    };

    let chain_id = client.chain_id().await.ok();
    let latency_ms = start.elapsed().as_millis() as u64;
    let chain_id_matches = chain_id == Some(expected_id);

    if !chain_id_matches {
        tracing::warn!(
            chain = %chain,
            expected = expected_id,
            reported = ?chain_id,
            "RPC endpoint serves a different chain"
        );
    }

    EndpointStatus {
        chain,
        is_online: true,
        chain_id,
        chain_id_matches,
        block_number: Some(block_number),
        latency_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usable_requires_matching_chain() {
        let status = EndpointStatus {
            chain: "ethereum-sepolia".to_string(),
            is_online: true,
            chain_id: Some(1),
            chain_id_matches: false,
            block_number: Some(100),
            latency_ms: 12,
        };
        assert!(!status.is_usable());

        let status = EndpointStatus {
            chain_id: Some(11155111),
            chain_id_matches: true,
            ..status
        };
        assert!(status.is_usable());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_offline() {
        let mut chain = lanegate_core::AppConfig::default().chains.remove(0);
        chain.rpc_url = "http://127.0.0.1:1".to_string();
        let client = EvmClient::new(chain, std::time::Duration::from_secs(2)).unwrap();

        let status = probe_endpoint(&client).await;
        assert!(!status.is_online);
        assert!(!status.is_usable());
        assert_eq!(status.block_number, None);
    }
}
