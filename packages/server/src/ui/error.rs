//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{domain::ChatError, infrastructure::dto::http::ErrorResponseDto};

/// Error returned by the chat endpoint.
///
/// Configuration and upstream failures look the same to the caller: 500 with
/// the error message.
#[derive(Debug)]
pub struct ApiError(pub ChatError);

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!("AI Error: {}", self.0);
        let body = ErrorResponseDto {
            error: self.0.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
