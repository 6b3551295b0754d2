//! Widget theme endpoint

use axum::{extract::State, routing::get, Json, Router};

use widget::{css_variables, stylesheet};

use crate::dto::ThemeResponse;
use crate::AppState;

const WIDGET_SELECTOR: &str = ".lanegate-widget";

/// Create widget routes
pub fn router() -> Router<AppState> {
    Router::new().route("/theme", get(get_theme))
}

/// GET /widget/theme - Theme config with derived CSS variables
pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    let theme = state.config().await.theme;
    Json(ThemeResponse {
        css_variables: css_variables(&theme),
        stylesheet: stylesheet(&theme, WIDGET_SELECTOR),
        theme,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_util::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_theme() {
        let (status, json) = get(offline_state(), "/widget/theme").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["cssVariables"]["--lanegate-primary"], "#375bd2");
        assert_eq!(json["theme"]["borderRadiusPx"], 8);
        assert!(json["stylesheet"]
            .as_str()
            .unwrap()
            .starts_with(".lanegate-widget {"));
    }
}
