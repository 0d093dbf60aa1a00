//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    domain::Conversation,
    infrastructure::dto::http::{ChatReplyDto, ChatRequestDto, HealthDto},
    ui::{error::ApiError, state::AppState},
    usecase::GenerateReplyUseCase,
};

/// Health check endpoint
pub async fn health_check() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Chat proxy endpoint
///
/// Forwards the message and its history to the configured provider and
/// returns the reply text.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequestDto>,
) -> Result<Json<ChatReplyDto>, ApiError> {
    let conversation = Conversation::from(request);
    let usecase = GenerateReplyUseCase::new(state.chat_gateway.clone());
    let reply = usecase.execute(conversation).await?;

    Ok(Json(ChatReplyDto { reply }))
}
