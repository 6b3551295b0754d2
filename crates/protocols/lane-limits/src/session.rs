//! Transfer session: current inputs plus the latest fetched dependencies
//!
//! Balance, decimals and rate limit each live in a slot keyed by the inputs
//! they were fetched for. A fetch takes a [`Ticket`] first; its result is
//! applied only if the slot still has the same key and nothing newer has been
//! applied since. Anything else is a stale resolution and is dropped.

use lanegate_core::{EvmAddress, Lane};

use crate::evaluator::{assess, check_balance, evaluate, Assessment, Verdict};
use crate::provider::{BalanceProvider, DecimalsProvider, RateLimitProvider};
use crate::state::{RateLimitState, TokenBalance, TransferRequest};
use crate::LaneError;

/// Inputs a balance fetch depends on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BalanceKey {
    pub chain: String,
    pub owner: EvmAddress,
    pub token: EvmAddress,
}

/// Inputs a decimals fetch depends on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenKey {
    pub chain: String,
    pub token: EvmAddress,
}

/// Claim on a slot, handed out when a fetch starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    pub key: K,
    pub seq: u64,
}

/// A finished fetch, ready to be applied to the session
#[derive(Debug)]
pub enum Resolution {
    Balance(Ticket<BalanceKey>, Result<TokenBalance, LaneError>),
    Decimals(Ticket<TokenKey>, Result<u8, LaneError>),
    Limit(Ticket<Lane>, Result<RateLimitState, LaneError>),
}

/// Tickets for everything that can be fetched with the current inputs
#[derive(Debug, Clone, Default)]
pub struct RefreshPlan {
    pub balance: Option<Ticket<BalanceKey>>,
    pub decimals: Option<Ticket<TokenKey>>,
    pub limit: Option<Ticket<Lane>>,
}

#[derive(Debug)]
struct Slot<K, V> {
    key: Option<K>,
    issued: u64,
    applied: u64,
    value: Option<V>,
}

impl<K, V> Default for Slot<K, V> {
    fn default() -> Self {
        Self {
            key: None,
            issued: 0,
            applied: 0,
            value: None,
        }
    }
}

impl<K: Clone + PartialEq, V> Slot<K, V> {
    /// Point the slot at new inputs. Every ticket issued so far goes stale.
    fn rekey(&mut self, key: Option<K>) {
        if self.key != key {
            self.key = key;
            self.value = None;
            self.applied = self.issued;
        }
    }

    fn begin(&mut self) -> Option<Ticket<K>> {
        let key = self.key.clone()?;
        self.issued += 1;
        Some(Ticket {
            key,
            seq: self.issued,
        })
    }

    fn accepts(&self, ticket: &Ticket<K>) -> bool {
        self.key.as_ref() == Some(&ticket.key) && ticket.seq > self.applied
    }

    fn apply(&mut self, ticket: Ticket<K>, value: Option<V>) -> bool {
        if !self.accepts(&ticket) {
            return false;
        }
        self.applied = ticket.seq;
        self.value = value;
        true
    }
}

/// State behind one transfer form
#[derive(Debug, Default)]
pub struct TransferSession {
    lane: Option<Lane>,
    owner: Option<EvmAddress>,
    amount: String,
    balance: Slot<BalanceKey, TokenBalance>,
    decimals: Slot<TokenKey, u8>,
    limit: Slot<Lane, RateLimitState>,
}

impl TransferSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lane(&self) -> Option<&Lane> {
        self.lane.as_ref()
    }

    pub fn owner(&self) -> Option<&EvmAddress> {
        self.owner.as_ref()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn balance(&self) -> Option<&TokenBalance> {
        self.balance.value.as_ref()
    }

    pub fn rate_limit(&self) -> Option<&RateLimitState> {
        self.limit.value.as_ref()
    }

    pub fn set_lane(&mut self, lane: Lane) {
        if self.lane.as_ref() != Some(&lane) {
            tracing::debug!(lane = %lane, "Lane changed");
            self.lane = Some(lane);
            self.rekey();
        }
    }

    pub fn set_owner(&mut self, owner: Option<EvmAddress>) {
        if self.owner != owner {
            self.owner = owner;
            self.rekey();
        }
    }

    /// Amount edits never invalidate fetched data
    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    fn rekey(&mut self) {
        let balance_key = match (&self.lane, self.owner) {
            (Some(lane), Some(owner)) => Some(BalanceKey {
                chain: lane.source.clone(),
                owner,
                token: lane.token,
            }),
            _ => None,
        };
        let token_key = self.lane.as_ref().map(|lane| TokenKey {
            chain: lane.source.clone(),
            token: lane.token,
        });

        self.balance.rekey(balance_key);
        self.decimals.rekey(token_key);
        self.limit.rekey(self.lane.clone());
    }

    pub fn begin_balance_fetch(&mut self) -> Option<Ticket<BalanceKey>> {
        self.balance.begin()
    }

    pub fn begin_decimals_fetch(&mut self) -> Option<Ticket<TokenKey>> {
        self.decimals.begin()
    }

    pub fn begin_limit_fetch(&mut self) -> Option<Ticket<Lane>> {
        self.limit.begin()
    }

    /// Start every fetch the current inputs allow
    pub fn begin_refresh(&mut self) -> RefreshPlan {
        RefreshPlan {
            balance: self.begin_balance_fetch(),
            decimals: self.begin_decimals_fetch(),
            limit: self.begin_limit_fetch(),
        }
    }

    pub fn apply_balance(
        &mut self,
        ticket: Ticket<BalanceKey>,
        result: Result<TokenBalance, LaneError>,
    ) -> bool {
        let seq = ticket.seq;
        let accepted = self.balance.apply(ticket, ok_or_log("balance", result));
        log_stale("balance", seq, accepted);
        accepted
    }

    pub fn apply_decimals(&mut self, ticket: Ticket<TokenKey>, result: Result<u8, LaneError>) -> bool {
        let seq = ticket.seq;
        let accepted = self.decimals.apply(ticket, ok_or_log("decimals", result));
        log_stale("decimals", seq, accepted);
        accepted
    }

    pub fn apply_limit(
        &mut self,
        ticket: Ticket<Lane>,
        result: Result<RateLimitState, LaneError>,
    ) -> bool {
        let seq = ticket.seq;
        let accepted = self.limit.apply(ticket, ok_or_log("rate limit", result));
        log_stale("rate limit", seq, accepted);
        accepted
    }

    /// Apply a resolution; returns whether it was current
    pub fn apply(&mut self, resolution: Resolution) -> bool {
        match resolution {
            Resolution::Balance(ticket, result) => self.apply_balance(ticket, result),
            Resolution::Decimals(ticket, result) => self.apply_decimals(ticket, result),
            Resolution::Limit(ticket, result) => self.apply_limit(ticket, result),
        }
    }

    /// Decimals from the token's own `decimals()` read. The balance carries
    /// a copy, but a failed decimals fetch still leaves this empty.
    pub fn token_decimals(&self) -> Option<u8> {
        self.decimals.value
    }

    /// The request as currently entered, once lane and decimals are known
    pub fn request(&self) -> Option<TransferRequest> {
        let lane = self.lane.as_ref()?;
        let decimals = self.token_decimals()?;
        Some(TransferRequest::new(lane, self.amount.clone(), decimals))
    }

    pub fn verdict(&self) -> Verdict {
        match self.request() {
            Some(request) => evaluate(&request, self.balance(), self.rate_limit()),
            None => Verdict::Unknown,
        }
    }

    pub fn assessment(&self) -> Assessment {
        match self.request() {
            Some(request) => assess(&request, self.balance(), self.rate_limit()),
            None => Assessment {
                balance: check_balance(&self.amount, self.balance()),
                verdict: Verdict::Unknown,
            },
        }
    }

    /// Fetch everything the current inputs allow and apply the results
    pub async fn refresh<P>(&mut self, provider: &P) -> Verdict
    where
        P: BalanceProvider + DecimalsProvider + RateLimitProvider + ?Sized,
    {
        let plan = self.begin_refresh();
        for resolution in fetch(provider, plan).await {
            self.apply(resolution);
        }
        self.verdict()
    }
}

/// Run the fetches of a plan concurrently
///
/// Does not touch the session, so the results can be sent back from another
/// task and applied later.
pub async fn fetch<P>(provider: &P, plan: RefreshPlan) -> Vec<Resolution>
where
    P: BalanceProvider + DecimalsProvider + RateLimitProvider + ?Sized,
{
    let RefreshPlan {
        balance,
        decimals,
        limit,
    } = plan;

    let balance = async move {
        let ticket = balance?;
        let result = provider.get_balance(&ticket.key.owner, &ticket.key.token).await;
        Some(Resolution::Balance(ticket, result))
    };
    let decimals = async move {
        let ticket = decimals?;
        let result = provider.get_decimals(&ticket.key.token).await;
        Some(Resolution::Decimals(ticket, result))
    };
    let limit = async move {
        let ticket = limit?;
        let result = provider.get_lane_rate_limit(&ticket.key).await;
        Some(Resolution::Limit(ticket, result))
    };

    let (balance, decimals, limit) = tokio::join!(balance, decimals, limit);
    [balance, decimals, limit].into_iter().flatten().collect()
}

fn ok_or_log<T>(what: &str, result: Result<T, LaneError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", what, e);
            None
        }
    }
}

fn log_stale(what: &str, seq: u64, accepted: bool) {
    if !accepted {
        tracing::debug!(seq, "Dropped stale {} resolution", what);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Denial, WaitEstimate};
    use async_trait::async_trait;
    use lanegate_core::{ProtocolError, RpcError};

    const E18: u128 = 1_000_000_000_000_000_000;

    fn owner() -> EvmAddress {
        EvmAddress::from_bytes([0x11; 20])
    }

    fn token() -> EvmAddress {
        EvmAddress::from_bytes([0x22; 20])
    }

    fn lane() -> Lane {
        Lane::new("ethereum-sepolia", "avalanche-fuji", token())
    }

    fn bucket(tokens: u128) -> RateLimitState {
        RateLimitState {
            tokens,
            capacity: 3 * E18,
            rate: E18 / 100,
            is_enabled: true,
            last_updated: 0,
        }
    }

    fn balance() -> TokenBalance {
        TokenBalance {
            value: 10 * E18,
            decimals: 18,
        }
    }

    struct MockProvider {
        limit: Option<RateLimitState>,
    }

    #[async_trait]
    impl BalanceProvider for MockProvider {
        async fn get_balance(
            &self,
            _owner: &EvmAddress,
            _token: &EvmAddress,
        ) -> Result<TokenBalance, LaneError> {
            Ok(balance())
        }
    }

    #[async_trait]
    impl DecimalsProvider for MockProvider {
        async fn get_decimals(&self, _token: &EvmAddress) -> Result<u8, LaneError> {
            Ok(18)
        }
    }

    #[async_trait]
    impl RateLimitProvider for MockProvider {
        async fn get_lane_rate_limit(&self, lane: &Lane) -> Result<RateLimitState, LaneError> {
            self.limit.ok_or_else(|| {
                LaneError::Protocol(ProtocolError::LaneNotSupported {
                    source_chain: lane.source.clone(),
                    destination_chain: lane.destination.clone(),
                    token: lane.token.to_string(),
                })
            })
        }
    }

    fn ready_session() -> TransferSession {
        let mut session = TransferSession::new();
        session.set_lane(lane());
        session.set_owner(Some(owner()));
        session.set_amount("1");
        session
    }

    #[tokio::test]
    async fn test_refresh_produces_refill_verdict() {
        let mut session = ready_session();
        let provider = MockProvider {
            limit: Some(bucket(E18 / 10)),
        };

        let verdict = session.refresh(&provider).await;
        match verdict {
            Verdict::Denied(Denial::AwaitRefill { wait, .. }) => {
                assert_eq!(wait, WaitEstimate::Seconds(90))
            }
            other => panic!("unexpected verdict {:?}", other),
        }
        assert_eq!(session.balance(), Some(&balance()));
    }

    #[tokio::test]
    async fn test_failed_limit_fetch_is_unknown() {
        let mut session = ready_session();
        let provider = MockProvider { limit: None };
        assert_eq!(session.refresh(&provider).await, Verdict::Unknown);
        assert!(session.rate_limit().is_none());
    }

    #[test]
    fn test_nothing_to_fetch_without_lane() {
        let mut session = TransferSession::new();
        let plan = session.begin_refresh();
        assert!(plan.balance.is_none());
        assert!(plan.decimals.is_none());
        assert!(plan.limit.is_none());
        assert_eq!(session.verdict(), Verdict::Unknown);
    }

    #[test]
    fn test_balance_needs_owner() {
        let mut session = TransferSession::new();
        session.set_lane(lane());
        let plan = session.begin_refresh();
        assert!(plan.balance.is_none());
        assert!(plan.limit.is_some());
    }

    #[test]
    fn test_older_resolution_after_newer_is_dropped() {
        let mut session = ready_session();
        let first = session.begin_limit_fetch().unwrap();
        let second = session.begin_limit_fetch().unwrap();

        assert!(session.apply_limit(second, Ok(bucket(2 * E18))));
        assert!(!session.apply_limit(first, Ok(bucket(0))));
        assert_eq!(session.rate_limit().map(|l| l.tokens), Some(2 * E18));
    }

    #[test]
    fn test_in_order_resolutions_are_both_applied() {
        let mut session = ready_session();
        let first = session.begin_limit_fetch().unwrap();
        let second = session.begin_limit_fetch().unwrap();

        assert!(session.apply_limit(first, Ok(bucket(0))));
        assert!(session.apply_limit(second, Ok(bucket(E18))));
        assert_eq!(session.rate_limit().map(|l| l.tokens), Some(E18));
    }

    #[test]
    fn test_lane_change_drops_inflight_results() {
        let mut session = ready_session();
        let ticket = session.begin_limit_fetch().unwrap();

        session.set_lane(Lane::new("avalanche-fuji", "ethereum-sepolia", token()));
        assert!(!session.apply_limit(ticket.clone(), Ok(bucket(E18))));
        assert!(session.rate_limit().is_none());

        // Switching back does not revive the old ticket
        session.set_lane(lane());
        assert!(!session.apply_limit(ticket, Ok(bucket(E18))));
    }

    #[test]
    fn test_owner_change_clears_balance_only() {
        let mut session = ready_session();
        let plan = session.begin_refresh();
        session.apply_balance(plan.balance.unwrap(), Ok(balance()));
        session.apply_limit(plan.limit.unwrap(), Ok(bucket(E18)));

        session.set_owner(Some(EvmAddress::from_bytes([0x33; 20])));
        assert!(session.balance().is_none());
        assert!(session.rate_limit().is_some());
    }

    #[test]
    fn test_amount_change_keeps_data() {
        let mut session = ready_session();
        let plan = session.begin_refresh();
        session.apply_balance(plan.balance.unwrap(), Ok(balance()));
        session.apply_decimals(plan.decimals.unwrap(), Ok(18));
        session.apply_limit(plan.limit.unwrap(), Ok(bucket(E18 / 10)));
        assert!(matches!(session.verdict(), Verdict::Denied(_)));

        session.set_amount("0.05");
        assert_eq!(session.verdict(), Verdict::Allowed);

        session.set_amount("4");
        assert!(matches!(
            session.verdict(),
            Verdict::Denied(Denial::ExceedsCapacity { .. })
        ));
    }

    #[test]
    fn test_error_clears_previous_value() {
        let mut session = ready_session();
        let ticket = session.begin_limit_fetch().unwrap();
        session.apply_limit(ticket, Ok(bucket(E18)));

        let ticket = session.begin_limit_fetch().unwrap();
        let err = LaneError::Rpc(RpcError::Timeout { secs: 15 });
        assert!(session.apply_limit(ticket, Err(err)));
        assert!(session.rate_limit().is_none());
        assert_eq!(session.verdict(), Verdict::Unknown);
    }

    #[test]
    fn test_failed_decimals_fetch_is_unknown() {
        let mut session = ready_session();
        let plan = session.begin_refresh();
        session.apply_balance(plan.balance.unwrap(), Ok(balance()));
        let err = LaneError::Rpc(RpcError::Timeout { secs: 15 });
        assert!(session.apply_decimals(plan.decimals.unwrap(), Err(err)));
        session.apply_limit(plan.limit.unwrap(), Ok(bucket(E18 / 10)));

        // The balance's own decimals do not stand in for the token's
        assert_eq!(session.token_decimals(), None);
        assert!(session.request().is_none());
        assert_eq!(session.verdict(), Verdict::Unknown);
    }

    #[test]
    fn test_assessment_without_decimals() {
        let session = ready_session();
        let assessment = session.assessment();
        assert_eq!(assessment.verdict, Verdict::Unknown);
        assert_eq!(assessment.balance, crate::BalanceStatus::Loading);
    }
}
