//! UseCase: チャット応答生成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GenerateReplyUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 上流プロバイダーへの呼び出しがリクエストごとにちょうど一回であることを保証
//! - 応答テキストが加工されずに返ること、エラーがそのまま伝わることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：応答テキストの返却
//! - 異常系：設定エラー、上流エラー

use std::sync::Arc;

use crate::domain::{ChatError, ChatGateway, Conversation};

/// チャット応答生成のユースケース
pub struct GenerateReplyUseCase {
    /// 上流プロバイダー（Gateway の抽象化）
    gateway: Arc<dyn ChatGateway>,
}

impl GenerateReplyUseCase {
    /// 新しい GenerateReplyUseCase を作成
    pub fn new(gateway: Arc<dyn ChatGateway>) -> Self {
        Self { gateway }
    }

    /// 応答生成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - 上流の応答テキスト（加工なし）
    /// * `Err(ChatError)` - 設定エラーまたは上流エラー
    pub async fn execute(&self, conversation: Conversation) -> Result<String, ChatError> {
        tracing::debug!(
            "Generating reply for message with {} history turns",
            conversation.history.len()
        );

        let reply = self.gateway.generate_reply(&conversation).await?;

        tracing::info!("AI reply: {}", reply);
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatRole, ChatTurn, MockChatGateway};

    #[tokio::test]
    async fn test_generate_reply_success() {
        // テスト項目: 上流を一度だけ呼び出し、応答をそのまま返す
        // given (前提条件):
        let mut gateway = MockChatGateway::new();
        gateway
            .expect_generate_reply()
            .withf(|conversation| conversation.message == "hello" && conversation.history.is_empty())
            .times(1)
            .returning(|_| Ok("  Welcome, adventurer!\n".to_string()));
        let usecase = GenerateReplyUseCase::new(Arc::new(gateway));

        // when (操作):
        let result = usecase
            .execute(Conversation::new("hello".to_string(), Vec::new()))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok("  Welcome, adventurer!\n".to_string()));
    }

    #[tokio::test]
    async fn test_generate_reply_passes_history() {
        // テスト項目: 履歴がそのまま Gateway に渡される
        let mut gateway = MockChatGateway::new();
        gateway
            .expect_generate_reply()
            .withf(|conversation| {
                conversation.history.len() == 2
                    && conversation.history[0].role == ChatRole::User
                    && conversation.history[1].role == ChatRole::Model
            })
            .times(1)
            .returning(|_| Ok("ok".to_string()));
        let usecase = GenerateReplyUseCase::new(Arc::new(gateway));
        let conversation = Conversation::new(
            "next".to_string(),
            vec![
                ChatTurn::new(ChatRole::User, "a".to_string()).unwrap(),
                ChatTurn::new(ChatRole::Model, "b".to_string()).unwrap(),
            ],
        );

        assert!(usecase.execute(conversation).await.is_ok());
    }

    #[tokio::test]
    async fn test_generate_reply_configuration_error() {
        // テスト項目: 設定エラーはそのまま返される
        let mut gateway = MockChatGateway::new();
        gateway
            .expect_generate_reply()
            .times(1)
            .returning(|_| Err(ChatError::Configuration("Gemini API Key missing".to_string())));
        let usecase = GenerateReplyUseCase::new(Arc::new(gateway));

        let result = usecase
            .execute(Conversation::new("hello".to_string(), Vec::new()))
            .await;

        assert_eq!(
            result,
            Err(ChatError::Configuration("Gemini API Key missing".to_string()))
        );
    }

    #[tokio::test]
    async fn test_generate_reply_upstream_error() {
        // テスト項目: 上流エラーはメッセージを保ったまま返される
        let mut gateway = MockChatGateway::new();
        gateway
            .expect_generate_reply()
            .times(1)
            .returning(|_| Err(ChatError::Upstream("quota exceeded".to_string())));
        let usecase = GenerateReplyUseCase::new(Arc::new(gateway));

        let result = usecase
            .execute(Conversation::new("hello".to_string(), Vec::new()))
            .await;

        assert_eq!(result.unwrap_err().to_string(), "quota exceeded");
    }
}
