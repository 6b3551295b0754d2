//! Configured chains and endpoint status

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use evm_rpc_client::{probe_endpoint, EndpointStatus};

use super::{lane_error, ErrorResponse};
use crate::dto::ChainResponse;
use crate::AppState;

/// Create chain routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_chains))
        .route("/:name/status", get(get_status))
}

/// GET /chains - List configured chains
pub async fn list_chains(State(state): State<AppState>) -> Json<Vec<ChainResponse>> {
    let config = state.config().await;
    Json(config.chains.iter().map(ChainResponse::from).collect())
}

/// GET /chains/:name/status - Probe a chain's RPC endpoint
pub async fn get_status(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<EndpointStatus>, ErrorResponse> {
    let client = state.client(&name).await.map_err(lane_error)?;
    Ok(Json(probe_endpoint(&client).await))
}
