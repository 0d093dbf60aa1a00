//! LLM chat proxy and WebSocket sensor relay.
//!
//! `POST /api/chat` forwards a message and its history to one configured
//! language-model provider; `/ws` lets clients join rooms and relays
//! `sensor` events to the other members of the `"game"` room.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::run as run_server;
