//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断時に接続と全てのルーム所属が削除されること
//!
//! ### なぜこのテストが必要か
//! - 切断したクライアントにイベントが届き続けないことを保証
//! - 残りの参加者のルーム所属に影響しないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルームに所属した参加者の切断
//! - エッジケース：最後の参加者の切断
//! - 異常系：存在しない参加者の切断試行

use std::sync::Arc;

use crate::domain::{ConnectionId, Participant, RoomRepository};

use super::error::DisconnectError;

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Participant)` - 削除された参加者（切断直前の所属ルームを含む）
    /// * `Err(DisconnectError)` - 接続が未登録
    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<Participant, DisconnectError> {
        self.repository
            .remove_participant(connection_id)
            .await
            .map_err(|_| DisconnectError::ConnectionNotFound(connection_id.to_string()))
    }

    /// 残りの参加者数を取得
    pub async fn count_remaining_participants(&self) -> usize {
        self.repository.count_connected_clients().await
    }
}
