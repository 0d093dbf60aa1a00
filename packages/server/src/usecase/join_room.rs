//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - ルーム参加は冪等であり、人数の上限がないことを保証
//! - 不正なルーム名が Repository に到達しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回参加、同じルームへの再参加、複数ルームへの参加
//! - 異常系：空のルーム名、未登録の接続

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomName, RoomRepository};

use super::error::JoinRoomError;

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(RoomName)` - 参加した（または既に参加していた）ルーム
    /// * `Err(JoinRoomError)` - ルーム名が不正、または接続が未登録
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room: String,
    ) -> Result<RoomName, JoinRoomError> {
        let room = RoomName::try_from(room)?;

        let newly_joined = self
            .repository
            .join_room(connection_id, room.clone())
            .await
            .map_err(|_| JoinRoomError::ConnectionNotFound(connection_id.to_string()))?;

        if !newly_joined {
            tracing::debug!("'{}' is already a member of room '{}'", connection_id, room);
        }

        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionIdFactory, ValueObjectError},
        infrastructure::repository::InMemoryRoomRepository,
        usecase::ConnectParticipantUseCase,
    };
    use std::collections::HashMap;
    use tokio::sync::{Mutex, mpsc};

    async fn setup() -> (Arc<InMemoryRoomRepository>, ConnectionId) {
        let repository = Arc::new(InMemoryRoomRepository::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));
        let (tx, _rx) = mpsc::unbounded_channel();
        let participant = ConnectParticipantUseCase::new(repository.clone())
            .execute(tx)
            .await
            .unwrap();
        (repository, participant.id)
    }

    #[tokio::test]
    async fn test_join_room_success() {
        // テスト項目: ルームに参加するとメンバーとして取得できる
        // given (前提条件):
        let (repository, id) = setup().await;
        let usecase = JoinRoomUseCase::new(repository.clone());

        // when (操作):
        let result = usecase.execute(&id, "game".to_string()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "game");
        assert_eq!(repository.get_room_members("game").await, vec![id]);
    }

    #[tokio::test]
    async fn test_join_room_twice_is_idempotent() {
        // テスト項目: 同じルームに二度参加してもエラーにならず、メンバーは一人
        let (repository, id) = setup().await;
        let usecase = JoinRoomUseCase::new(repository.clone());

        usecase.execute(&id, "game".to_string()).await.unwrap();
        let result = usecase.execute(&id, "game".to_string()).await;

        assert!(result.is_ok());
        assert_eq!(repository.get_room_members("game").await.len(), 1);
    }

    #[tokio::test]
    async fn test_join_multiple_rooms() {
        // テスト項目: 一つの接続が複数のルームに所属できる
        let (repository, id) = setup().await;
        let usecase = JoinRoomUseCase::new(repository.clone());

        usecase.execute(&id, "game".to_string()).await.unwrap();
        usecase.execute(&id, "lobby".to_string()).await.unwrap();

        let participant = repository.get_participant(&id).await.unwrap();
        assert_eq!(participant.rooms.len(), 2);
    }

    #[tokio::test]
    async fn test_join_room_empty_name() {
        // テスト項目: 空のルーム名は拒否される
        let (repository, id) = setup().await;
        let usecase = JoinRoomUseCase::new(repository.clone());

        let result = usecase.execute(&id, String::new()).await;

        assert_eq!(
            result,
            Err(JoinRoomError::InvalidRoomName(ValueObjectError::RoomNameEmpty))
        );
        let participant = repository.get_participant(&id).await.unwrap();
        assert!(participant.rooms.is_empty());
    }

    #[tokio::test]
    async fn test_join_room_unknown_connection() {
        // テスト項目: 未登録の接続はルームに参加できない
        let (repository, _id) = setup().await;
        let usecase = JoinRoomUseCase::new(repository);
        let stranger = ConnectionIdFactory::generate();

        let result = usecase.execute(&stranger, "game".to_string()).await;

        assert_eq!(
            result,
            Err(JoinRoomError::ConnectionNotFound(stranger.to_string()))
        );
    }
}
