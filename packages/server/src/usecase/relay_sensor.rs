//! UseCase: センサーイベント中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelaySensorUseCase::execute() メソッド
//! - ブロードキャスト対象の選定（"game" ルームのメンバーから送信者を除く）
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にイベントが戻らないことを保証
//! - 他のルームのメンバーにイベントが漏れないこと（ルームの分離）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メンバーへの中継
//! - エッジケース：送信者のみがメンバー（対象なし）、送信者が "game" 以外にのみ所属
//! - 異常系：未登録の接続からの送信

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRepository, SENSOR_ROOM};

use super::error::RelaySensorError;

/// センサーイベント中継のユースケース
pub struct RelaySensorUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl RelaySensorUseCase {
    /// 新しい RelaySensorUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// センサーイベントの中継先を決定
    ///
    /// # Arguments
    ///
    /// * `from` - イベントを送信した接続の ID
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 中継先の接続 ID リスト（送信者が "game" に未所属なら空）
    /// * `Err(RelaySensorError)` - 送信者が未登録
    pub async fn execute(&self, from: &ConnectionId) -> Result<Vec<ConnectionId>, RelaySensorError> {
        let sender = self
            .repository
            .get_participant(from)
            .await
            .map_err(|_| RelaySensorError::ConnectionNotFound(from.to_string()))?;

        if !sender.is_member_of(SENSOR_ROOM) {
            tracing::debug!(
                "Ignoring sensor event from '{}': not a member of '{}'",
                from,
                SENSOR_ROOM
            );
            return Ok(Vec::new());
        }

        Ok(self.get_broadcast_targets(from).await)
    }

    /// ブロードキャスト対象の接続 ID リストを取得
    ///
    /// "game" ルームのメンバーのうち送信者以外を返す
    async fn get_broadcast_targets(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.repository
            .get_room_members(SENSOR_ROOM)
            .await
            .into_iter()
            .filter(|id| id != exclude)
            .collect()
    }
}
