//! HTTP API request/response DTOs for the chat proxy.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{ChatRole, Conversation};

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequestDto {
    pub message: String,
    /// Raw history entries; `null`, a missing field or any non-array counts as empty
    #[serde(default)]
    pub history: Value,
}

impl ChatRequestDto {
    pub fn history_entries(&self) -> Vec<HistoryEntryDto> {
        self.history
            .as_array()
            .map(|entries| entries.iter().map(HistoryEntryDto::from_value).collect())
            .unwrap_or_default()
    }
}

/// One history entry as the browser sends it.
///
/// The browser keeps history in the `{ role, parts: [{ text }] }` shape; a flat
/// `{ role, text }` entry is accepted too. Entries are read leniently from raw
/// JSON so that a malformed one is dropped later instead of failing the whole
/// request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryEntryDto {
    pub role: Option<String>,
    pub text: Option<String>,
}

impl HistoryEntryDto {
    /// Read `role` and the text of the first part (or the flat `text`).
    ///
    /// Fields of the wrong type are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let part_text = value
            .get("parts")
            .and_then(Value::as_array)
            .and_then(|parts| parts.first())
            .and_then(|part| part.get("text"))
            .and_then(Value::as_str);
        let text = part_text.or_else(|| value.get("text").and_then(Value::as_str));

        Self {
            role: value.get("role").and_then(Value::as_str).map(str::to_string),
            text: text.map(str::to_string),
        }
    }

    pub fn role(&self) -> ChatRole {
        ChatRole::from_wire(self.role.as_deref().unwrap_or_default())
    }
}

impl From<ChatRequestDto> for Conversation {
    fn from(dto: ChatRequestDto) -> Self {
        let history = dto
            .history_entries()
            .into_iter()
            .map(|entry| (entry.role(), entry.text))
            .collect::<Vec<_>>();
        Conversation::from_raw_history(dto.message, history)
    }
}

/// Successful chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReplyDto {
    pub reply: String,
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}

/// Health check response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}
