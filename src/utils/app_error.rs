use std::fmt::Display;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

/// Rejection returned by extractors and middleware before a widget handler runs.
#[derive(Debug)]
pub struct AppError {
    pub code: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn unauthorized() -> Self {
        AppError {
            code: StatusCode::UNAUTHORIZED,
            message: "Unauthorized".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError {
            code: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Query string that failed to deserialize or validate.
    pub fn invalid_query(reason: impl Display) -> Self {
        Self::bad_request(format!("Invalid query: {}", reason))
    }
}

/// Body of every error response; clients decode it to show the message.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseJson {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response<Body> {
        (self.code, Json(ErrorResponseJson { message: self.message })).into_response()
    }
}
