//! Gemini `generateContent` client.
//!
//! History and the new message go upstream as an ordered `contents` list of
//! `{ role, parts: [{ text }] }` entries; the reply is read from
//! `candidates[0].content.parts[0].text`.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{ChatError, ChatRole, Conversation};

use super::{EMPTY_REPLY_MESSAGE, read_json_body, upstream_error_message};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemma-3-4b-it";
pub const MAX_OUTPUT_TOKENS: u32 = 1000;
const DEFAULT_ERROR_MESSAGE: &str = "Gemini Error";

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

fn role_name(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

fn content(role: &str, text: &str) -> Content {
    Content {
        role: Some(role.to_string()),
        parts: vec![Part {
            text: Some(text.to_string()),
        }],
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(http: Client, api_key: Option<String>, base_url: String, model: String) -> Self {
        Self {
            http,
            api_key,
            base_url,
            model,
        }
    }

    pub fn build_request(conversation: &Conversation) -> GenerateContentRequest {
        let contents = conversation
            .history
            .iter()
            .map(|turn| content(role_name(turn.role), turn.text.as_str()))
            .chain(std::iter::once(content("user", &conversation.message)))
            .collect();

        GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    pub async fn generate(&self, conversation: &Conversation) -> Result<String, ChatError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ChatError::Configuration("Gemini API Key missing".to_string()))?;

        let request = Self::build_request(conversation);
        tracing::debug!(
            "Sending {} contents to Gemini model '{}'",
            request.contents.len(),
            self.model
        );

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = read_json_body(response).await?;

        if !status.is_success() {
            tracing::error!("Gemini error details ({}): {}", status, body);
            return Err(ChatError::Upstream(upstream_error_message(
                &body,
                DEFAULT_ERROR_MESSAGE,
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_value(body)
            .map_err(|_| ChatError::Upstream(EMPTY_REPLY_MESSAGE.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| ChatError::Upstream(EMPTY_REPLY_MESSAGE.to_string()))
    }
}
