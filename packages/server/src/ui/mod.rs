//! UI layer: HTTP and WebSocket endpoints.

pub mod error;
mod handler;
pub mod router;
mod runner;
mod signal;
pub mod state;

pub use router::build_router;
pub use runner::{run, serve};
pub use signal::shutdown_signal;
