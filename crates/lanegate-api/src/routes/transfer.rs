//! Transfer assessment endpoint

use axum::extract::State;
use axum::{routing::post, Json, Router};
use axum_extra::extract::WithRejection;

use lane_limits::{
    validate_lane, BalanceProvider, BalanceStatus, DecimalsProvider, RateLimitProvider,
    TransferSession,
};
use lanegate_core::{validate_amount, EvmAddress, Lane};
use widget::Banner;

use super::{lane_error, parse_address, protocol_error, ApiJson, ErrorResponse};
use crate::dto::{AssessRequest, AssessResponse, BalanceStatusDto, VerdictDto};
use crate::AppState;

/// Shown in banners when the token's symbol cannot be read
const FALLBACK_SYMBOL: &str = "tokens";

/// Create transfer routes
pub fn router() -> Router<AppState> {
    Router::new().route("/assess", post(assess))
}

/// POST /transfer/assess - Balance check and rate-limit verdict for a transfer
///
/// Failed lookups do not fail the request; they leave the verdict unknown.
pub async fn assess(
    State(state): State<AppState>,
    WithRejection(Json(request), _): ApiJson<AssessRequest>,
) -> Result<Json<AssessResponse>, ErrorResponse> {
    let token = parse_address(&request.token)?;

    // Only the shape is checked here; scale and range depend on the token
    validate_amount(&request.amount).map_err(|e| protocol_error(e.into()))?;

    let owner = request
        .owner
        .as_deref()
        .map(parse_address)
        .transpose()?;

    let lane = Lane::new(request.source.clone(), request.destination.clone(), token);
    validate_lane(&state.registry().await, &lane).map_err(protocol_error)?;

    let provider = state
        .cached_provider(&lane.source)
        .await
        .map_err(lane_error)?;

    let session = run_session(&provider, lane, owner, request.amount).await;

    let symbol = match session.assessment().balance {
        BalanceStatus::Insufficient { .. } => provider
            .inner()
            .token_symbol(&token)
            .await
            .unwrap_or_else(|_| FALLBACK_SYMBOL.to_string()),
        _ => FALLBACK_SYMBOL.to_string(),
    };

    Ok(Json(respond(&session, &symbol)))
}

/// Fill a fresh session from `provider`
async fn run_session<P>(
    provider: &P,
    lane: Lane,
    owner: Option<EvmAddress>,
    amount: String,
) -> TransferSession
where
    P: BalanceProvider + DecimalsProvider + RateLimitProvider + ?Sized,
{
    let mut session = TransferSession::new();
    session.set_lane(lane);
    session.set_owner(owner);
    session.set_amount(amount);
    session.refresh(provider).await;
    session
}

fn respond(session: &TransferSession, symbol: &str) -> AssessResponse {
    let verdict = session.verdict();
    let assessment = session.assessment();
    let decimals = session
        .token_decimals()
        .or_else(|| session.balance().map(|b| b.decimals));

    tracing::debug!(verdict = %verdict, balance = ?assessment.balance, "Assessed transfer");

    let banner = match (&assessment.balance, decimals) {
        (BalanceStatus::Insufficient { .. }, Some(decimals)) => {
            Banner::insufficient_balance(&assessment.balance, decimals, symbol)
        }
        _ => Banner::from_verdict(&verdict),
    };

    AssessResponse {
        verdict: VerdictDto::from(&verdict),
        banner,
        balance: BalanceStatusDto::new(&assessment.balance, decimals),
    }
}
