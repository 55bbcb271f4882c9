use crate::{
    types::{app_state::AppState, lat_lng::LatLng},
    utils::validated_query::ValidatedQuery,
    widget::search_widget::{PanelSnapshot, Selection},
};
use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

#[derive(Validate, Deserialize)]
pub struct PostSearchSelectionPayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub fsq_id: String,

    #[validate(range(min = -90.0, max = 90.0, message = "Must be a latitude"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Must be a longitude"))]
    pub lng: f64,

    #[serde(default)]
    pub label: String,
}

/// Click on a suggestion. Detail failures are not reported to the caller;
/// the returned panel is simply unchanged.
pub async fn post_search_selection(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<PostSearchSelectionPayload>,
) -> Json<PanelSnapshot> {
    state
        .widget
        .select(Selection {
            fsq_id: payload.fsq_id,
            location: LatLng::new(payload.lat, payload.lng),
            label: payload.label,
        })
        .await;

    Json(state.widget.panel())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;
    use tracing_test::traced_test;

    use crate::{
        app::gen_mock_app,
        utils::app_error::ErrorResponseJson,
        widget::search_widget::{PanelSnapshot, SearchPhase},
    };

    async fn error_message(response: axum::response::Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponseJson = serde_json::from_slice(&body).unwrap();
        body.message
    }

    #[tokio::test]
    #[traced_test]
    async fn places_marker_for_selection() {
        let mut mock_app = gen_mock_app().await;
        let token_before = mock_app.state.widget.session_token();

        let mock_server = mock_app
            .places_server
            .mock("GET", "/places/park1")
            .match_query(mockito::Matcher::Regex(".*".to_string()))
            .with_header("content-type", "application/json")
            .with_body(r#"{"fsq_id":"park1","name":"Central Park","rating":9.2}"#)
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search-selection?fsq_id=park1&lat=40.78&lng=-73.96&label=Central%20Park")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        mock_server.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: PanelSnapshot = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.phase, SearchPhase::Idle);
        assert_eq!(body.input, "Central Park");

        let map = mock_app.state.map.snapshot();
        assert_eq!(map.markers.len(), 1);
        assert!(map.markers[0].spec.popup.html.contains("9.2"));
        assert_ne!(mock_app.state.widget.session_token(), token_before);
        assert!(logs_contain("Selected place Central Park"));
    }

    #[tokio::test]
    async fn rejects_out_of_range_coordinates() {
        let mock_app = gen_mock_app().await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search-selection?fsq_id=park1&lat=123&lng=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = error_message(response).await;
        assert!(message.starts_with("Invalid query"), "{}", message);
        assert!(message.contains("Must be a latitude"), "{}", message);
    }

    #[tokio::test]
    async fn rejects_empty_id() {
        let mock_app = gen_mock_app().await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/search-selection?fsq_id=&lat=1&lng=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let message = error_message(response).await;
        assert!(message.contains("Must be at least 1 character"), "{}", message);
    }
}
