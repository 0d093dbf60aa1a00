//! Handlers for the chat proxy, health check and WebSocket relay.

pub mod http;
pub mod websocket;

pub use http::{chat, health_check};
pub use websocket::websocket_handler;
