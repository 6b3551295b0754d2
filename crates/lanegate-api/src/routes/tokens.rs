//! Token balance and allowance endpoints

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use axum_extra::extract::WithRejection;

use lane_limits::BalanceProvider;
use lanegate_core::format_base_units;

use super::{lane_error, parse_address, ApiQuery, ErrorResponse};
use crate::dto::{AllowanceResponse, BalanceResponse, TokenQuery};
use crate::AppState;

/// Create token routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/balance", get(get_balance))
        .route("/allowance", get(get_allowance))
}

/// GET /tokens/balance?chain&owner&token - ERC-20 balance of a wallet
pub async fn get_balance(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<TokenQuery>,
) -> Result<Json<BalanceResponse>, ErrorResponse> {
    let owner = parse_address(&query.owner)?;
    let token = parse_address(&query.token)?;
    let provider = state.provider(&query.chain).await.map_err(lane_error)?;

    let balance = provider
        .get_balance(&owner, &token)
        .await
        .map_err(lane_error)?;

    Ok(Json(BalanceResponse {
        chain: query.chain,
        owner: owner.to_string(),
        token: token.to_string(),
        value: balance.value.to_string(),
        decimals: balance.decimals,
        formatted: format_base_units(balance.value, balance.decimals),
    }))
}

/// GET /tokens/allowance?chain&owner&token - Allowance granted to the chain's router
pub async fn get_allowance(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<TokenQuery>,
) -> Result<Json<AllowanceResponse>, ErrorResponse> {
    let owner = parse_address(&query.owner)?;
    let token = parse_address(&query.token)?;
    let provider = state.provider(&query.chain).await.map_err(lane_error)?;

    let value = provider
        .router_allowance(&owner, &token)
        .await
        .map_err(lane_error)?;

    Ok(Json(AllowanceResponse {
        spender: provider.client().chain().router.to_string(),
        chain: query.chain,
        owner: owner.to_string(),
        token: token.to_string(),
        value: value.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use axum::http::StatusCode;

    const OWNER: &str = "0x1111111111111111111111111111111111111111";
    const TOKEN: &str = "0x2222222222222222222222222222222222222222";

    #[tokio::test]
    async fn test_invalid_owner() {
        let uri = format!(
            "/tokens/balance?chain=ethereum-sepolia&owner=0x123&token={}",
            TOKEN
        );
        let (status, json) = get(offline_state(), &uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "invalid_address");
    }

    #[tokio::test]
    async fn test_missing_query_parameter() {
        let (status, json) = get(offline_state(), "/tokens/balance?chain=ethereum-sepolia").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "invalid_request");
        assert!(json["message"].as_str().unwrap().contains("owner"));
    }

    #[tokio::test]
    async fn test_unreachable_rpc() {
        let uri = format!(
            "/tokens/allowance?chain=ethereum-sepolia&owner={}&token={}",
            OWNER, TOKEN
        );
        let (status, json) = get(offline_state(), &uri).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["code"], "rpc_unavailable");
    }
}
