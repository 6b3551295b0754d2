//! Rate/capacity evaluation
//!
//! Pure functions, no I/O. Amounts are compared in base units only, scaled
//! with the token's on-chain decimals.

use std::fmt;

use lanegate_core::{format_base_units, to_base_units, BaseUnits};

use crate::constants::{CAPACITY_MESSAGE, REFILL_MESSAGE, WAIT_UNKNOWN_MESSAGE};
use crate::state::{RateLimitState, TokenBalance, TransferRequest};
use crate::wait::WaitEstimate;

/// Outcome of checking a transfer against a lane's bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Some input is missing or unusable; render nothing
    Unknown,
    Allowed,
    Denied(Denial),
}

/// Why a transfer cannot go through right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// Larger than the bucket can ever hold
    ExceedsCapacity {
        amount: BaseUnits,
        capacity: BaseUnits,
        decimals: u8,
    },
    /// Fits the bucket, but the bucket has to refill first
    AwaitRefill {
        shortfall: BaseUnits,
        wait: WaitEstimate,
    },
}

impl Denial {
    /// Banner text for this denial
    pub fn message(&self) -> String {
        match self {
            Self::ExceedsCapacity {
                capacity, decimals, ..
            } => format!(
                "{} ({}).",
                CAPACITY_MESSAGE,
                format_base_units(*capacity, *decimals)
            ),
            Self::AwaitRefill {
                wait: w @ WaitEstimate::Seconds(_),
                ..
            } => format!("{}. Try again in {}.", REFILL_MESSAGE, w),
            Self::AwaitRefill {
                wait: WaitEstimate::Indeterminate,
                ..
            } => format!("{}. {}.", REFILL_MESSAGE, WAIT_UNKNOWN_MESSAGE),
        }
    }

    pub fn wait(&self) -> Option<WaitEstimate> {
        match self {
            Self::ExceedsCapacity { .. } => None,
            Self::AwaitRefill { wait, .. } => Some(*wait),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Allowed => write!(f, "allowed"),
            Self::Denied(d) => write!(f, "denied: {}", d.message()),
        }
    }
}

/// Wallet balance relative to the requested amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    /// Balance not loaded yet
    Loading,
    Sufficient,
    Insufficient {
        required: BaseUnits,
        available: BaseUnits,
    },
    /// Amount cannot be read at the token's precision
    InvalidAmount,
}

/// Compare the requested amount with the wallet balance.
pub fn check_balance(amount: &str, balance: Option<&TokenBalance>) -> BalanceStatus {
    let Some(balance) = balance else {
        return BalanceStatus::Loading;
    };

    match to_base_units(amount, balance.decimals) {
        Ok(required) if required <= balance.value => BalanceStatus::Sufficient,
        Ok(required) => BalanceStatus::Insufficient {
            required,
            available: balance.value,
        },
        Err(_) => BalanceStatus::InvalidAmount,
    }
}

/// Evaluate a transfer against the lane's bucket.
///
/// - no limit snapshot, or an amount unreadable at `token_decimals` -> `Unknown`
/// - balance not loaded or insufficient -> `Allowed` (reported by [`check_balance`])
/// - disabled bucket -> `Allowed`
/// - amount > capacity -> `Denied(ExceedsCapacity)`
/// - amount > tokens -> `Denied(AwaitRefill)` with `ceil((amount - tokens) / rate)` seconds
pub fn evaluate(
    request: &TransferRequest,
    balance: Option<&TokenBalance>,
    limit: Option<&RateLimitState>,
) -> Verdict {
    let Some(limit) = limit else {
        return Verdict::Unknown;
    };

    let Ok(amount) = to_base_units(&request.amount, request.token_decimals) else {
        return Verdict::Unknown;
    };

    if check_balance(&request.amount, balance) != BalanceStatus::Sufficient {
        return Verdict::Allowed;
    }

    if !limit.is_enabled {
        return Verdict::Allowed;
    }

    if amount > limit.capacity {
        return Verdict::Denied(Denial::ExceedsCapacity {
            amount,
            capacity: limit.capacity,
            decimals: request.token_decimals,
        });
    }

    if amount > limit.tokens {
        let shortfall = amount - limit.tokens;
        return Verdict::Denied(Denial::AwaitRefill {
            shortfall,
            wait: WaitEstimate::for_shortfall(shortfall, limit.rate),
        });
    }

    Verdict::Allowed
}

/// Balance check and rate-limit verdict together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub balance: BalanceStatus,
    pub verdict: Verdict,
}

pub fn assess(
    request: &TransferRequest,
    balance: Option<&TokenBalance>,
    limit: Option<&RateLimitState>,
) -> Assessment {
    Assessment {
        balance: check_balance(&request.amount, balance),
        verdict: evaluate(request, balance, limit),
    }
}
