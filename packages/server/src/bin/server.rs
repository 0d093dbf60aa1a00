//! Chat proxy and sensor relay server.
//!
//! Run with:
//! ```not_rust
//! GEMINI_API_KEY=... cargo run --bin dungeon-relay-server -- --provider gemini
//! ```

use clap::Parser;
use dungeon_relay_server::config::ServerArgs;
use dungeon_relay_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    // .env first so that it can feed both the CLI env fallbacks and the API keys
    dotenvy::dotenv().ok();

    let args = ServerArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // Run the server
    if let Err(e) = dungeon_relay_server::run_server(args.into_config()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
