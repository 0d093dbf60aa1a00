//! Upstream language-model providers.
//!
//! Exactly one provider is active, chosen by configuration at startup.

pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};

use crate::{
    config::{LlmConfig, ProviderKind},
    domain::{ChatError, ChatGateway, Conversation},
};

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// Message used when a success response has no reply text
pub const EMPTY_REPLY_MESSAGE: &str = "AI returned an empty response";

/// The configured upstream provider
#[derive(Debug, Clone)]
pub enum LlmClient {
    Gemini(GeminiClient),
    OpenAi(OpenAiClient),
}

impl LlmClient {
    pub fn from_config(config: &LlmConfig) -> Self {
        let http = reqwest::Client::new();
        match config.provider {
            ProviderKind::Gemini => Self::Gemini(GeminiClient::new(
                http,
                config.gemini_api_key.clone(),
                config.gemini_base_url.clone(),
                config.gemini_model.clone(),
            )),
            ProviderKind::OpenAi => Self::OpenAi(OpenAiClient::new(
                http,
                config.openai_api_key.clone(),
                config.openai_base_url.clone(),
                config.openai_model.clone(),
            )),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Gemini(_) => ProviderKind::Gemini,
            Self::OpenAi(_) => ProviderKind::OpenAi,
        }
    }
}

#[async_trait]
impl ChatGateway for LlmClient {
    async fn generate_reply(&self, conversation: &Conversation) -> Result<String, ChatError> {
        match self {
            Self::Gemini(client) => client.generate(conversation).await,
            Self::OpenAi(client) => client.generate(conversation).await,
        }
    }
}

/// Read a response body as JSON.
///
/// An undecodable success body is an upstream error carrying the decode error.
/// An undecodable error body becomes `Value::Null` so the provider's default
/// message applies.
async fn read_json_body(response: Response) -> Result<serde_json::Value, ChatError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ChatError::Upstream(e.to_string()))?;
    decode_body(status, &text)
}

fn decode_body(status: StatusCode, text: &str) -> Result<serde_json::Value, ChatError> {
    match serde_json::from_str(text) {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Ok(serde_json::Value::Null),
        Err(e) => Err(ChatError::Upstream(e.to_string())),
    }
}

/// Extract `error.message` from an upstream error body
fn upstream_error_message(body: &serde_json::Value, default: &str) -> String {
    body.get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
        .filter(|message| !message.is_empty())
        .unwrap_or(default)
        .to_string()
}
