//! Lane Rate Limits
//!
//! Decides whether a cross-chain transfer fits through a lane's token bucket.
//! Each lane (source chain, destination chain, token) has an outbound bucket
//! on the source-chain token pool with a capacity, a current fill and a refill
//! rate. A transfer larger than the capacity can never pass; one larger than
//! the current fill has to wait for the bucket to refill.
//!
//! The evaluator itself is pure. Data comes in through the provider traits,
//! and [`TransferSession`] keeps only the latest resolution of each fetch.

pub mod cache;
pub mod constants;
pub mod evaluator;
pub mod provider;
pub mod session;
pub mod state;
pub mod validate;
pub mod wait;

use lanegate_core::{ProtocolError, RpcError};

pub use cache::{CachedProvider, RateLimitCache};
pub use evaluator::{assess, check_balance, evaluate, Assessment, BalanceStatus, Denial, Verdict};
pub use provider::{
    BalanceProvider, ChainRegistry, DecimalsProvider, EvmLaneProvider, RateLimitProvider,
};
pub use session::{fetch, BalanceKey, RefreshPlan, Resolution, Ticket, TokenKey, TransferSession};
pub use state::{LaneRateLimits, RateLimitState, TokenBalance, TransferRequest};
pub use validate::validate_lane;
pub use wait::{format_wait, WaitEstimate};

/// Errors from fetching lane data
#[derive(Debug, thiserror::Error)]
pub enum LaneError {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl LaneError {
    /// Get an HTTP-friendly error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Rpc(_) => "rpc_unavailable",
            Self::Protocol(e) => e.error_code(),
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Rpc(_) => 503,
            Self::Protocol(e) => e.status_code(),
        }
    }
}
