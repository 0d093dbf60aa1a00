//! Domain layer for the relay server.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod gateway;
pub mod repository;
pub mod value_object;

pub use entity::{ChatTurn, Conversation, Participant, SENSOR_ROOM};
pub use error::{ChatError, RepositoryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use gateway::ChatGateway;
pub use repository::RoomRepository;
pub use value_object::{ChatRole, ConnectionId, RoomName, Timestamp, TurnText};

#[cfg(test)]
pub use gateway::MockChatGateway;
#[cfg(test)]
pub use repository::MockRoomRepository;
