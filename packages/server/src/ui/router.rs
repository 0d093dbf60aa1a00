//! Route table.

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use super::{
    handler::{chat, health_check, websocket_handler},
    state::AppState,
};

/// Build the application router.
///
/// Anything that is not an API or WebSocket route is looked up in `public_dir`.
pub fn build_router(state: Arc<AppState>, public_dir: &Path) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/chat", post(chat))
        .route("/ws", get(websocket_handler))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
