//! API route handlers

pub mod chains;
pub mod health;
pub mod lanes;
pub mod tokens;
pub mod transfer;
pub mod widget;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::response::{IntoResponse, Response};
use axum::{http::StatusCode, routing::get, Json, Router};
use axum_extra::extract::WithRejection;

use lane_limits::LaneError;
use lanegate_core::{EvmAddress, ProtocolError};

use crate::dto::ApiError;
use crate::AppState;

/// Error half of every handler's result
pub type ErrorResponse = (StatusCode, Json<ApiError>);

/// Query extractor whose rejections use the API error shape
pub type ApiQuery<T> = WithRejection<Query<T>, RejectionResponse>;

/// JSON body extractor whose rejections use the API error shape
pub type ApiJson<T> = WithRejection<Json<T>, RejectionResponse>;

/// Extractor rejection rendered as an [`ApiError`]
#[derive(Debug)]
pub struct RejectionResponse(ErrorResponse);

impl From<QueryRejection> for RejectionResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self((
            rejection.status(),
            Json(ApiError::invalid_request(rejection.body_text())),
        ))
    }
}

impl From<JsonRejection> for RejectionResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self((
            rejection.status(),
            Json(ApiError::invalid_request(rejection.body_text())),
        ))
    }
}

impl IntoResponse for RejectionResponse {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/chains", chains::router())
        .nest("/tokens", tokens::router())
        .nest("/lanes", lanes::router())
        .nest("/transfer", transfer::router())
        .nest("/widget", widget::router())
        .with_state(state)
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub(crate) fn lane_error(e: LaneError) -> ErrorResponse {
    (
        status(e.status_code()),
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}

pub(crate) fn protocol_error(e: ProtocolError) -> ErrorResponse {
    (
        status(e.status_code()),
        Json(ApiError::new(e.error_code(), e.to_string())),
    )
}

/// Parse a `0x` address from a request parameter
pub(crate) fn parse_address(value: &str) -> Result<EvmAddress, ErrorResponse> {
    value.parse().map_err(protocol_error)
}

#[cfg(test)]
pub(crate) mod test_util {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use lanegate_core::AppConfig;
    use tower::ServiceExt;

    use crate::{create_app, AppState};

    /// Default chains pointed at a closed local port
    pub fn offline_state() -> AppState {
        let mut config = AppConfig::default();
        for chain in &mut config.chains {
            chain.rpc_url = "http://127.0.0.1:1".to_string();
        }
        config.rpc_timeout_secs = 2;
        AppState::with_config(config)
    }

    pub async fn send(state: AppState, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_app(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(state, request).await
    }

    pub async fn post_json(
        state: AppState,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(state, request).await
    }
}
