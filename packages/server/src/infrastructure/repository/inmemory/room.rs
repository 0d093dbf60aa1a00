//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//! ルームは独立したエンティティを持たず、各接続が所属するルーム名の集合として表現されます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::{
    domain::{ConnectionId, Participant, RepositoryError, RoomName, RoomRepository},
    ui::state::ClientInfo,
};

/// インメモリ Room Repository 実装
///
/// 接続 ID → ClientInfo（送信チャンネルと所属ルーム）のマップを保持します。
/// 同じマップを AppState と共有し、UI 層はそこからメッセージを配送します。
pub struct InMemoryRoomRepository {
    /// 接続中のクライアント情報（WebSocket sender を含む）
    connected_clients: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(connected_clients: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>) -> Self {
        Self { connected_clients }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn add_participant(
        &self,
        participant: Participant,
        sender: UnboundedSender<String>,
    ) -> Result<(), RepositoryError> {
        let mut clients = self.connected_clients.lock().await;
        if clients.contains_key(&participant.id) {
            return Err(RepositoryError::DuplicateConnection(
                participant.id.into_string(),
            ));
        }
        clients.insert(
            participant.id.clone(),
            ClientInfo {
                sender,
                participant,
            },
        );
        Ok(())
    }

    async fn remove_participant(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, RepositoryError> {
        let mut clients = self.connected_clients.lock().await;
        clients
            .remove(connection_id)
            .map(|info| info.participant)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))
    }

    async fn join_room(
        &self,
        connection_id: &ConnectionId,
        room: RoomName,
    ) -> Result<bool, RepositoryError> {
        let mut clients = self.connected_clients.lock().await;
        let info = clients
            .get_mut(connection_id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))?;
        Ok(info.participant.join(room))
    }

    async fn get_participant(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Participant, RepositoryError> {
        let clients = self.connected_clients.lock().await;
        clients
            .get(connection_id)
            .map(|info| info.participant.clone())
            .ok_or_else(|| RepositoryError::ConnectionNotFound(connection_id.to_string()))
    }

    async fn get_room_members(&self, room: &str) -> Vec<ConnectionId> {
        let clients = self.connected_clients.lock().await;
        clients
            .values()
            .filter(|info| info.participant.is_member_of(room))
            .map(|info| info.participant.id.clone())
            .collect()
    }

    async fn count_connected_clients(&self) -> usize {
        let clients = self.connected_clients.lock().await;
        clients.len()
    }
}
