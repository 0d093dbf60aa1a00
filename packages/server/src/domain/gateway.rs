//! Gateway trait for the upstream language-model provider.

use async_trait::async_trait;

use super::{ChatError, Conversation};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send the conversation upstream and return the reply text
    async fn generate_reply(&self, conversation: &Conversation) -> Result<String, ChatError>;
}
