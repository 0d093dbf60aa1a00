//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 新しい接続の登録（どのルームにも所属しない状態で開始）
//!
//! ### なぜこのテストが必要か
//! - 接続直後の参加者はどのルームのブロードキャスト対象にもならないことを保証
//! - Repository のエラーが UseCase のエラーに正しく変換されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - 異常系：Repository が重複を報告した場合

use std::sync::Arc;

use dungeon_relay_shared::time::get_jst_timestamp;
use tokio::sync::mpsc::UnboundedSender;

use crate::domain::{ConnectionId, ConnectionIdFactory, Participant, RoomRepository, Timestamp};

use super::error::ConnectError;

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - この接続へのメッセージ送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 登録された参加者（新しく採番された接続 ID を含む）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        sender: UnboundedSender<String>,
    ) -> Result<Participant, ConnectError> {
        self.execute_with_id(ConnectionIdFactory::generate(), sender)
            .await
    }

    /// 接続 ID を指定して参加者接続を実行
    pub async fn execute_with_id(
        &self,
        connection_id: ConnectionId,
        sender: UnboundedSender<String>,
    ) -> Result<Participant, ConnectError> {
        let participant = Participant::new(connection_id, Timestamp::new(get_jst_timestamp()));

        self.repository
            .add_participant(participant.clone(), sender)
            .await
            .map_err(|_| ConnectError::DuplicateConnection(participant.id.to_string()))?;

        Ok(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockRoomRepository, RepositoryError},
        infrastructure::repository::InMemoryRoomRepository,
    };
    use std::collections::HashMap;
    use tokio::sync::{Mutex, mpsc};

    fn create_test_repository() -> Arc<InMemoryRoomRepository> {
        Arc::new(InMemoryRoomRepository::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))))
    }

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 新しい接続が登録され、どのルームにも所属していない
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(tx).await;

        // then (期待する結果):
        let participant = result.unwrap();
        assert!(participant.rooms.is_empty());
        assert_eq!(repository.count_connected_clients().await, 1);
        let stored = repository.get_participant(&participant.id).await.unwrap();
        assert_eq!(stored.id, participant.id);
    }

    #[tokio::test]
    async fn test_connect_participant_generates_distinct_ids() {
        // テスト項目: 接続ごとに異なる ID が採番される
        let repository = create_test_repository();
        let usecase = ConnectParticipantUseCase::new(repository.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        let first = usecase.execute(tx1).await.unwrap();
        let second = usecase.execute(tx2).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(repository.count_connected_clients().await, 2);
    }

    #[tokio::test]
    async fn test_connect_participant_duplicate() {
        // テスト項目: Repository が重複を返すと DuplicateConnection になる
        // given (前提条件):
        let mut repository = MockRoomRepository::new();
        repository
            .expect_add_participant()
            .times(1)
            .returning(|participant, _| {
                Err(RepositoryError::DuplicateConnection(
                    participant.id.to_string(),
                ))
            });
        let usecase = ConnectParticipantUseCase::new(Arc::new(repository));
        let id = ConnectionIdFactory::generate();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute_with_id(id.clone(), tx).await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ConnectError::DuplicateConnection(id.to_string())
        );
    }
}
