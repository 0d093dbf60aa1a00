//! OpenAI chat completions client.
//!
//! A fixed system instruction precedes the history; roles are mapped onto
//! `user` / `assistant` and the reply is read from `choices[0].message.content`.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{ChatError, ChatRole, Conversation};

use super::{EMPTY_REPLY_MESSAGE, read_json_body, upstream_error_message};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const MAX_COMPLETION_TOKENS: u32 = 300;
pub const SYSTEM_INSTRUCTION: &str = "あなたはダンジョンマスターです。";
const DEFAULT_ERROR_MESSAGE: &str = "OpenAI Error";

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatCompletionMessage>,
    pub max_completion_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatCompletionMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChatCompletionMessage>,
}

fn role_name(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "assistant",
    }
}

fn message(role: &str, content: &str) -> ChatCompletionMessage {
    ChatCompletionMessage {
        role: role.to_string(),
        content: Some(content.to_string()),
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(http: Client, api_key: Option<String>, base_url: String, model: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
            model,
        }
    }

    pub fn build_request(&self, conversation: &Conversation) -> ChatCompletionRequest {
        let messages = std::iter::once(message("system", SYSTEM_INSTRUCTION))
            .chain(
                conversation
                    .history
                    .iter()
                    .map(|turn| message(role_name(turn.role), turn.text.as_str())),
            )
            .chain(std::iter::once(message("user", &conversation.message)))
            .collect();

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: MAX_COMPLETION_TOKENS,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    pub async fn generate(&self, conversation: &Conversation) -> Result<String, ChatError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ChatError::Configuration("OpenAI API Key missing".to_string()))?;

        let request = self.build_request(conversation);
        tracing::debug!(
            "Sending {} messages to OpenAI model '{}'",
            request.messages.len(),
            self.model
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = read_json_body(response).await?;

        if !status.is_success() {
            tracing::error!("OpenAI error details ({}): {}", status, body);
            return Err(ChatError::Upstream(upstream_error_message(
                &body,
                DEFAULT_ERROR_MESSAGE,
            )));
        }

        let parsed: ChatCompletionResponse = serde_json::from_value(body)
            .map_err(|_| ChatError::Upstream(EMPTY_REPLY_MESSAGE.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| ChatError::Upstream(EMPTY_REPLY_MESSAGE.to_string()))
    }
}
