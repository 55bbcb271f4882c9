use crate::{types::app_state::AppState, widget::search_widget::PanelSnapshot};
use axum::{extract::State, Json};

pub async fn get_search_panel(State(state): State<AppState>) -> Json<PanelSnapshot> {
    Json(state.widget.panel())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{
        app::gen_mock_app,
        types::lat_lng::LatLng,
        widget::search_widget::{PanelSnapshot, SearchPhase},
    };

    #[tokio::test]
    async fn reports_idle_panel() {
        let mock_app = gen_mock_app().await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .uri("/search-panel")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: PanelSnapshot = serde_json::from_slice(&body).unwrap();

        assert_eq!(body.phase, SearchPhase::Idle);
        assert!(!body.dropdown_visible);
        assert!(body.suggestions.is_empty());
        assert_eq!(body.center, LatLng::FALLBACK);
    }
}
