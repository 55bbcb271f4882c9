use std::{sync::Arc, time::Duration};

use crate::{
    middlewares::auth::auth_middleware,
    routes::apply_routes,
    services::places_client::places_service::{PlacesService, PlacesServiceConfig},
    types::app_state::AppState,
    widget::{
        headless_map::HeadlessMap,
        map_view::{MapOptions, MapView},
        search_widget::SearchWidget,
    },
};
use axum::{middleware, response::Html, routing::get, Router};
use tower_http::cors::CorsLayer;

pub fn gen_state(
    places: PlacesServiceConfig,
    debounce: Duration,
    auth_key: Option<String>,
) -> AppState {
    let map = Arc::new(HeadlessMap::new(MapOptions::default()));
    let widget = SearchWidget::mount(
        PlacesService::new(places),
        map.clone() as Arc<dyn MapView>,
        debounce,
    );

    AppState {
        widget,
        map,
        auth_key,
    }
}

pub fn gen_app(state: AppState) -> Router {
    let cors_middleware = CorsLayer::new();

    apply_routes(Router::new())
        .route("/", get(root))
        .layer(cors_middleware)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

// Mount points the widget reads from and renders into.
async fn root() -> Html<&'static str> {
    Html(
        r#"<div class="explorer">
  <input id="explorer-search" type="text" autocomplete="off" placeholder="Search places"/>
  <div id="explorer-dropdown" style="display: none">
    <ul id="explorer-suggestions"></ul>
    <div id="explorer-error" style="display: none">Something went wrong. Please refresh and try again.</div>
    <div id="explorer-not-found" style="display: none"></div>
  </div>
  <div id="map"></div>
</div>"#,
    )
}

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub state: AppState,
    pub places_server: mockito::ServerGuard,
}

#[cfg(test)]
pub async fn gen_mock_app() -> MockApp {
    let places_server = mockito::Server::new_async().await;
    let state = gen_state(
        PlacesServiceConfig {
            api_key: "fsq-key".to_string(),
            host: places_server.url(),
        },
        Duration::from_millis(20),
        None,
    );

    MockApp {
        app: gen_app(state.clone()),
        state,
        places_server,
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::utils::app_error::ErrorResponseJson;

    fn places() -> PlacesServiceConfig {
        PlacesServiceConfig {
            api_key: "fsq-key".to_string(),
            host: "http://localhost".to_string(),
        }
    }

    #[tokio::test]
    async fn serves_mount_points() {
        let app = gen_app(gen_state(places(), Duration::from_millis(300), None));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        for id in [
            "explorer-search",
            "explorer-dropdown",
            "explorer-suggestions",
            "explorer-error",
            "explorer-not-found",
        ] {
            assert!(body.contains(id), "missing mount point {}", id);
        }
    }

    #[tokio::test]
    async fn auth_key_guards_routes() {
        let state = gen_state(
            places(),
            Duration::from_millis(300),
            Some("secret".to_string()),
        );

        let rejected = gen_app(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/search-panel")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
        let body = axum::body::to_bytes(rejected.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponseJson = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, "Unauthorized");

        let accepted = gen_app(state)
            .oneshot(
                Request::builder()
                    .uri("/search-panel")
                    .header("authorization", "secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(accepted.status(), StatusCode::OK);
    }
}
