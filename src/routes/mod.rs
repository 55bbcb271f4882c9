use axum::{
    routing::{get, post},
    Router,
};

use crate::types::app_state::AppState;

mod get_map_state;
mod get_search_panel;
mod post_search_input;
mod post_search_selection;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route(
        "/search-input",
        post(post_search_input::post_search_input),
    )
    .route("/search-panel", get(get_search_panel::get_search_panel))
    .route(
        "/search-selection",
        post(post_search_selection::post_search_selection),
    )
    .route("/map", get(get_map_state::get_map_state))
}
