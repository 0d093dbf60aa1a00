//! Repository trait for connection and room membership storage.
//!
//! The domain layer defines the interface; infrastructure provides the
//! implementation (dependency inversion).

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use super::{ConnectionId, Participant, RepositoryError, RoomName};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Register a new connection together with its outbound channel
    async fn add_participant(
        &self,
        participant: Participant,
        sender: UnboundedSender<String>,
    ) -> Result<(), RepositoryError>;

    /// Remove a connection and every membership it holds
    async fn remove_participant(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, RepositoryError>;

    /// Add a room to a connection's memberships.
    ///
    /// Returns `Ok(false)` when the connection was already a member.
    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room: RoomName,
    ) -> Result<bool, RepositoryError>;

    async fn get_participant(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, RepositoryError>;

    /// Every connection that has joined the named room
    async fn get_room_members(&self, room: &str) -> Vec<ConnectionId>;

    async fn count_connected_clients(&self) -> usize;
}
