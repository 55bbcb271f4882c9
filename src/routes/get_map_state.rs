use crate::{types::app_state::AppState, widget::headless_map::MapSnapshot};
use axum::{extract::State, Json};

pub async fn get_map_state(State(state): State<AppState>) -> Json<MapSnapshot> {
    Json(state.map.snapshot())
}
