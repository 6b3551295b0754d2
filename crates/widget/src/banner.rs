//! Warning banners shown above the transfer button

use lane_limits::constants::DENIED_TITLE;
use lane_limits::{BalanceStatus, Verdict};
use lanegate_core::format_base_units;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BannerLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub level: BannerLevel,
    pub title: String,
    pub message: String,
}

impl Banner {
    /// Only denied transfers produce a banner
    pub fn from_verdict(verdict: &Verdict) -> Option<Self> {
        match verdict {
            Verdict::Denied(denial) => Some(Self {
                level: BannerLevel::Warning,
                title: DENIED_TITLE.to_string(),
                message: denial.message(),
            }),
            Verdict::Unknown | Verdict::Allowed => None,
        }
    }

    /// Notice for a balance below the requested amount
    pub fn insufficient_balance(status: &BalanceStatus, decimals: u8, symbol: &str) -> Option<Self> {
        let BalanceStatus::Insufficient {
            required,
            available,
        } = status
        else {
            return None;
        };

        Some(Self {
            level: BannerLevel::Error,
            title: "Insufficient balance".to_string(),
            message: format!(
                "You need {} {} but only have {} {}.",
                format_base_units(*required, decimals),
                symbol,
                format_base_units(*available, decimals),
                symbol
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_limits::{Denial, WaitEstimate};

    #[test]
    fn test_only_denied_renders() {
        assert!(Banner::from_verdict(&Verdict::Allowed).is_none());
        assert!(Banner::from_verdict(&Verdict::Unknown).is_none());
    }

    #[test]
    fn test_refill_banner() {
        let verdict = Verdict::Denied(Denial::AwaitRefill {
            shortfall: 9,
            wait: WaitEstimate::Seconds(90),
        });
        let banner = Banner::from_verdict(&verdict).unwrap();
        assert_eq!(banner.level, BannerLevel::Warning);
        assert_eq!(banner.title, DENIED_TITLE);
        assert_eq!(
            banner.message,
            "Amount exceeds the currently available pool capacity. Try again in 1m 30s."
        );
    }

    #[test]
    fn test_capacity_banner() {
        let verdict = Verdict::Denied(Denial::ExceedsCapacity {
            amount: 4_000_000,
            capacity: 2_500_000,
            decimals: 6,
        });
        let banner = Banner::from_verdict(&verdict).unwrap();
        assert_eq!(
            banner.message,
            "Amount exceeds the per-transaction capacity of this lane (2.5)."
        );
    }

    #[test]
    fn test_insufficient_balance_banner() {
        let status = BalanceStatus::Insufficient {
            required: 2_000_000,
            available: 1_500_000,
        };
        let banner = Banner::insufficient_balance(&status, 6, "USDC").unwrap();
        assert_eq!(banner.level, BannerLevel::Error);
        assert_eq!(banner.message, "You need 2 USDC but only have 1.5 USDC.");

        assert!(Banner::insufficient_balance(&BalanceStatus::Sufficient, 6, "USDC").is_none());
    }
}
