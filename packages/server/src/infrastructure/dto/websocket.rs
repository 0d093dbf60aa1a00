//! WebSocket message DTOs for the room relay.
//!
//! Every frame is a JSON envelope `{ "event": <name>, "data": <payload> }`.

use serde::{Deserialize, Serialize};

/// Events a client sends to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Join the named room
    Join(String),
    /// Opaque sensor payload for the other members of the sensor room.
    ///
    /// `data` may be omitted; it is then relayed as `null`.
    Sensor(Option<serde_json::Value>),
}

/// Events the server pushes to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A sensor payload relayed from another member, unmodified
    SensorUpdate(serde_json::Value),
}
