//! Data Transfer Objects for API requests and responses
//!
//! Base-unit amounts are sent as decimal strings; JSON numbers cannot carry
//! a full uint128.

use std::collections::BTreeMap;

use lane_limits::{BalanceStatus, RateLimitState, Verdict};
use lanegate_core::{format_base_units, ChainConfig, ThemeConfig};
use serde::{Deserialize, Serialize};
use widget::Banner;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Query string or body that could not be read
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("invalid_request", message)
    }
}

/// Configured chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainResponse {
    pub name: String,
    pub chain_id: u64,
    /// 64-bit selector as a string
    pub selector: String,
    pub router: String,
}

impl From<&ChainConfig> for ChainResponse {
    fn from(chain: &ChainConfig) -> Self {
        Self {
            name: chain.name.clone(),
            chain_id: chain.chain_id,
            selector: chain.selector.as_u64().to_string(),
            router: chain.router.to_string(),
        }
    }
}

/// `?chain&owner&token`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenQuery {
    pub chain: String,
    pub owner: String,
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub chain: String,
    pub owner: String,
    pub token: String,
    /// Base units
    pub value: String,
    pub decimals: u8,
    pub formatted: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceResponse {
    pub chain: String,
    pub owner: String,
    pub token: String,
    /// Router of the chain
    pub spender: String,
    /// Base units
    pub value: String,
}

/// `?source&destination&token`
#[derive(Debug, Clone, Deserialize)]
pub struct LaneQuery {
    pub source: String,
    pub destination: String,
    pub token: String,
}

/// Token bucket with base-unit strings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDto {
    pub tokens: String,
    pub capacity: String,
    pub rate: String,
    pub is_enabled: bool,
    pub last_updated: u32,
}

impl From<&RateLimitState> for BucketDto {
    fn from(state: &RateLimitState) -> Self {
        Self {
            tokens: state.tokens.to_string(),
            capacity: state.capacity.to_string(),
            rate: state.rate.to_string(),
            is_enabled: state.is_enabled,
            last_updated: state.last_updated,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneRateLimitResponse {
    pub source: String,
    pub destination: String,
    pub token: String,
    /// Outbound bucket of the token pool
    pub token_bucket: BucketDto,
    /// Lane-wide bucket of the on-ramp
    pub aggregate_bucket: BucketDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaneSupportResponse {
    pub source: String,
    pub destination: String,
    pub token: String,
    /// Router on the source chain serves the destination
    pub chain_supported: bool,
    /// A pool exists for the token on this lane
    pub token_supported: bool,
}

/// POST /transfer/assess body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessRequest {
    pub source: String,
    pub destination: String,
    pub token: String,
    /// Human-readable amount, e.g. "1.5"
    pub amount: String,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictDto {
    /// "unknown", "allowed" or "denied"
    pub status: String,
    pub message: Option<String>,
    pub wait_seconds: Option<u64>,
}

impl From<&Verdict> for VerdictDto {
    fn from(verdict: &Verdict) -> Self {
        match verdict {
            Verdict::Unknown => Self {
                status: "unknown".to_string(),
                message: None,
                wait_seconds: None,
            },
            Verdict::Allowed => Self {
                status: "allowed".to_string(),
                message: None,
                wait_seconds: None,
            },
            Verdict::Denied(denial) => Self {
                status: "denied".to_string(),
                message: Some(denial.message()),
                wait_seconds: denial.wait().and_then(|w| w.seconds()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceStatusDto {
    /// "loading", "sufficient", "insufficient" or "invalidAmount"
    pub status: String,
    pub required: Option<String>,
    pub available: Option<String>,
}

impl BalanceStatusDto {
    pub fn new(status: &BalanceStatus, decimals: Option<u8>) -> Self {
        let format = |value: u128| match decimals {
            Some(d) => format_base_units(value, d),
            None => value.to_string(),
        };
        match status {
            BalanceStatus::Loading => Self::bare("loading"),
            BalanceStatus::Sufficient => Self::bare("sufficient"),
            BalanceStatus::InvalidAmount => Self::bare("invalidAmount"),
            BalanceStatus::Insufficient {
                required,
                available,
            } => Self {
                status: "insufficient".to_string(),
                required: Some(format(*required)),
                available: Some(format(*available)),
            },
        }
    }

    fn bare(status: &str) -> Self {
        Self {
            status: status.to_string(),
            required: None,
            available: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessResponse {
    pub verdict: VerdictDto,
    pub banner: Option<Banner>,
    pub balance: BalanceStatusDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub theme: ThemeConfig,
    pub css_variables: BTreeMap<String, String>,
    pub stylesheet: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_limits::{Denial, WaitEstimate};

    #[test]
    fn test_verdict_dto() {
        let denied = Verdict::Denied(Denial::AwaitRefill {
            shortfall: 1,
            wait: WaitEstimate::Seconds(90),
        });
        let dto = VerdictDto::from(&denied);
        assert_eq!(dto.status, "denied");
        assert_eq!(dto.wait_seconds, Some(90));

        let dto = VerdictDto::from(&Verdict::Unknown);
        assert_eq!(dto.status, "unknown");
        assert!(dto.message.is_none());
    }

    #[test]
    fn test_bucket_dto_keeps_full_precision() {
        let state = RateLimitState {
            tokens: u128::MAX,
            capacity: u128::MAX,
            rate: 1,
            is_enabled: true,
            last_updated: 0,
        };
        let json = serde_json::to_value(BucketDto::from(&state)).unwrap();
        assert_eq!(json["tokens"], u128::MAX.to_string());
        assert_eq!(json["isEnabled"], true);
    }

    #[test]
    fn test_balance_status_dto() {
        let status = BalanceStatus::Insufficient {
            required: 2_000_000,
            available: 1_500_000,
        };
        let dto = BalanceStatusDto::new(&status, Some(6));
        assert_eq!(dto.status, "insufficient");
        assert_eq!(dto.required.as_deref(), Some("2"));
        assert_eq!(dto.available.as_deref(), Some("1.5"));
    }
}
