//! Shared utilities for Dungeon Relay binaries.

pub mod logger;
pub mod time;
