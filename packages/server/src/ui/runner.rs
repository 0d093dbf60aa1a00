//! Server startup.

use std::{future::Future, path::Path, sync::Arc};

use tokio::net::TcpListener;

use crate::config::ServerConfig;

use super::{router::build_router, signal::shutdown_signal, state::AppState};

/// Bind the configured address and serve until a shutdown signal arrives
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = Arc::new(AppState::from_config(&config.llm));
    let listener = TcpListener::bind(config.bind_address()).await?;

    tracing::info!(
        "Server running: http://{} (provider: {:?}, public dir: {})",
        listener.local_addr()?,
        config.llm.provider,
        config.public_dir.display()
    );

    serve(listener, state, &config.public_dir, shutdown_signal()).await
}

/// Serve the application on an already bound listener
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    public_dir: &Path,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state, public_dir);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
