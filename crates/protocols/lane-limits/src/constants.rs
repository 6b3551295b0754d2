//! Lane rate limit constants

/// Banner title shown for any denied transfer
pub const DENIED_TITLE: &str = "Transfer limit reached";

/// Shown when the amount can never pass the lane in one transfer
pub const CAPACITY_MESSAGE: &str = "Amount exceeds the per-transaction capacity of this lane";

/// Shown when the bucket has to refill before the amount can pass
pub const REFILL_MESSAGE: &str = "Amount exceeds the currently available pool capacity";

/// Shown when the bucket does not refill (rate of zero)
pub const WAIT_UNKNOWN_MESSAGE: &str = "Wait time unknown";

/// Default interval between lane polls in the watcher
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
