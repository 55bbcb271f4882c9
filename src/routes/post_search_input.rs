use crate::{
    types::app_state::AppState,
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

#[derive(Validate, Deserialize)]
pub struct PostSearchInputPayload {
    #[serde(default)]
    #[validate(length(max = 256, message = "Must be at most 256 characters"))]
    pub value: String,
}

/// Input event from the search field. Debounced, so the panel updates later.
pub async fn post_search_input(
    State(state): State<AppState>,
    ValidatedQuery(PostSearchInputPayload { value }): ValidatedQuery<PostSearchInputPayload>,
) -> Result<Response, AppError> {
    debug!("Search input changed to {:?}", value);
    state.widget.on_input(value);

    Ok(StatusCode::ACCEPTED.into_response())
}
