//! Lane rate limit endpoints

use axum::extract::{Query, State};
use axum::{routing::get, Json, Router};
use axum_extra::extract::WithRejection;

use lane_limits::validate_lane;
use lanegate_core::Lane;

use super::{lane_error, parse_address, protocol_error, ApiQuery, ErrorResponse};
use crate::dto::{BucketDto, LaneQuery, LaneRateLimitResponse, LaneSupportResponse};
use crate::AppState;

/// Create lane routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rate-limit", get(get_rate_limit))
        .route("/supported", get(get_supported))
}

async fn lane_from_query(state: &AppState, query: &LaneQuery) -> Result<Lane, ErrorResponse> {
    let token = parse_address(&query.token)?;
    let lane = Lane::new(query.source.clone(), query.destination.clone(), token);
    validate_lane(&state.registry().await, &lane).map_err(protocol_error)?;
    Ok(lane)
}

/// GET /lanes/rate-limit?source&destination&token - Token and lane-wide buckets
pub async fn get_rate_limit(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<LaneQuery>,
) -> Result<Json<LaneRateLimitResponse>, ErrorResponse> {
    let lane = lane_from_query(&state, &query).await?;
    let provider = state.provider(&lane.source).await.map_err(lane_error)?;
    let limits = provider
        .lane_rate_limits(&lane)
        .await
        .map_err(lane_error)?;

    Ok(Json(LaneRateLimitResponse {
        token_bucket: BucketDto::from(&limits.token),
        aggregate_bucket: BucketDto::from(&limits.aggregate),
        source: lane.source,
        destination: lane.destination,
        token: lane.token.to_string(),
    }))
}

/// GET /lanes/supported?source&destination&token - Whether the bridge serves a lane
pub async fn get_supported(
    State(state): State<AppState>,
    WithRejection(Query(query), _): ApiQuery<LaneQuery>,
) -> Result<Json<LaneSupportResponse>, ErrorResponse> {
    let lane = lane_from_query(&state, &query).await?;
    let provider = state.provider(&lane.source).await.map_err(lane_error)?;

    let chain_supported = provider
        .is_chain_supported(&lane.destination)
        .await
        .map_err(lane_error)?;
    let token_supported = chain_supported
        && provider
            .is_token_supported(&lane)
            .await
            .map_err(lane_error)?;

    Ok(Json(LaneSupportResponse {
        source: lane.source.clone(),
        destination: lane.destination.clone(),
        token: lane.token.to_string(),
        chain_supported,
        token_supported,
    }))
}
