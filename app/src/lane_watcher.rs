//! Lane watcher
//!
//! Polls one lane's balance, decimals and rate limit on an interval and logs
//! the verdict whenever it changes. Fetches run as background tasks and send
//! their results back over a channel, so a slow poll can overlap the next
//! one; the session drops whichever result has gone stale. Lines on stdin
//! replace the amount.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lane_limits::{fetch, validate_lane, Resolution, TransferSession, Verdict};
use lanegate_api::AppState;
use lanegate_core::{EvmAddress, Lane};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use widget::Banner;

/// What to watch
#[derive(Debug, Clone)]
pub struct WatchTarget {
    pub lane: Lane,
    pub amount: String,
    pub owner: Option<EvmAddress>,
    pub interval: Duration,
}

/// Remembers the last reported verdict
#[derive(Debug, Default)]
struct VerdictLog {
    last: Option<Verdict>,
}

impl VerdictLog {
    /// Record a verdict; true if it differs from the previous one
    fn observe(&mut self, verdict: &Verdict) -> bool {
        if self.last.as_ref() == Some(verdict) {
            return false;
        }
        self.last = Some(verdict.clone());
        true
    }
}

fn report(session: &TransferSession, log: &mut VerdictLog) {
    let verdict = session.verdict();
    if !log.observe(&verdict) {
        return;
    }

    match Banner::from_verdict(&verdict) {
        Some(banner) => tracing::warn!(
            amount = session.amount(),
            "{}: {}",
            banner.title,
            banner.message
        ),
        None => tracing::info!(amount = session.amount(), verdict = %verdict, "Verdict changed"),
    }
}

/// Watch until Ctrl-C
pub async fn watch(state: &AppState, target: WatchTarget) -> anyhow::Result<()> {
    validate_lane(&state.registry().await, &target.lane).context("invalid lane")?;

    let provider = Arc::new(state.cached_provider(&target.lane.source).await?);

    let mut session = TransferSession::new();
    session.set_lane(target.lane.clone());
    session.set_owner(target.owner);
    session.set_amount(target.amount);

    tracing::info!(lane = %target.lane, interval = ?target.interval, "Watching lane");

    let (tx, mut rx) = mpsc::channel::<Vec<Resolution>>(8);
    let mut ticker = tokio::time::interval(target.interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut log = VerdictLog::default();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let plan = session.begin_refresh();
                let provider = provider.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let resolutions = fetch(provider.as_ref(), plan).await;
                    if tx.send(resolutions).await.is_err() {
                        tracing::debug!("Watcher gone, dropping poll results");
                    }
                });
            }
            Some(resolutions) = rx.recv() => {
                for resolution in resolutions {
                    session.apply(resolution);
                }
                report(&session, &mut log);
            }
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => {
                    let amount = line.trim();
                    if !amount.is_empty() {
                        tracing::info!(amount, "Amount changed");
                        session.set_amount(amount);
                        report(&session, &mut log);
                    }
                }
                Ok(None) => stdin_open = false,
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    stdin_open = false;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watcher");
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_limits::{Denial, WaitEstimate};

    #[test]
    fn test_verdict_log_reports_changes_only() {
        let mut log = VerdictLog::default();
        assert!(log.observe(&Verdict::Unknown));
        assert!(!log.observe(&Verdict::Unknown));
        assert!(log.observe(&Verdict::Allowed));

        let denied = Verdict::Denied(Denial::AwaitRefill {
            shortfall: 10,
            wait: WaitEstimate::Seconds(10),
        });
        assert!(log.observe(&denied));
        assert!(!log.observe(&denied));

        let shorter = Verdict::Denied(Denial::AwaitRefill {
            shortfall: 5,
            wait: WaitEstimate::Seconds(5),
        });
        assert!(log.observe(&shorter));
    }

    #[tokio::test]
    async fn test_rejects_unconfigured_lane() {
        let state = AppState::new();
        let target = WatchTarget {
            lane: Lane::new("ethereum-sepolia", "solana", EvmAddress::from_bytes([1; 20])),
            amount: "1".to_string(),
            owner: None,
            interval: Duration::from_secs(1),
        };
        assert!(watch(&state, target).await.is_err());
    }
}
