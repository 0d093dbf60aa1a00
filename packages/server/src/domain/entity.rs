//! Core domain models for the relay server.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{
    error::ValueObjectError,
    value_object::{ChatRole, ConnectionId, RoomName, Timestamp, TurnText},
};

/// Name of the room whose members exchange sensor events
pub const SENSOR_ROOM: &str = "game";

/// A live WebSocket connection and the rooms it has joined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// Connection identifier
    pub id: ConnectionId,
    /// Rooms this connection has joined
    pub rooms: BTreeSet<RoomName>,
    /// Timestamp when the connection was established
    pub connected_at: Timestamp,
}

impl Participant {
    /// Create a participant that has not joined any room yet
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            rooms: BTreeSet::new(),
            connected_at,
        }
    }

    /// Join a room. Returns `false` when already a member.
    pub fn join(&mut self, room: RoomName) -> bool {
        self.rooms.insert(room)
    }

    /// Milliseconds elapsed between connecting and `now`
    pub fn connected_for_millis(&self, now: Timestamp) -> i64 {
        (now.value() - self.connected_at.value()).max(0)
    }

    /// Whether this connection has joined the room with the given name
    pub fn is_member_of(&self, room: &str) -> bool {
        self.rooms.iter().any(|r| r.as_str() == room)
    }
}

/// One exchange turn of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: TurnText,
}

impl ChatTurn {
    pub fn new(role: ChatRole, text: String) -> Result<Self, ValueObjectError> {
        Ok(Self {
            role,
            text: TurnText::new(text)?,
        })
    }
}

/// A new user message together with the conversation so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    /// The new user message
    pub message: String,
    /// Earlier turns, oldest first
    pub history: Vec<ChatTurn>,
}

impl Conversation {
    pub fn new(message: String, history: Vec<ChatTurn>) -> Self {
        Self { message, history }
    }

    /// Build a conversation from raw history entries.
    ///
    /// Entries whose text is missing or blank are dropped; the rest keep their order.
    pub fn from_raw_history<I>(message: String, history: I) -> Self
    where
        I: IntoIterator<Item = (ChatRole, Option<String>)>,
    {
        let history = history
            .into_iter()
            .filter_map(|(role, text)| ChatTurn::new(role, text?).ok())
            .collect();
        Self { message, history }
    }
}
