//! Server configuration.
//!
//! Listener and provider selection come from the command line (with
//! environment fallbacks); API keys come from the environment only.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::infrastructure::llm::{gemini, openai};

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Upstream provider used by the chat proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ProviderKind {
    #[default]
    Gemini,
    #[value(name = "openai")]
    OpenAi,
}

/// Command line arguments of the server binary
#[derive(Debug, Clone, Parser)]
#[command(name = "dungeon-relay-server", version, about = "LLM chat proxy and WebSocket sensor relay")]
pub struct ServerArgs {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Upstream provider for /api/chat
    #[arg(long, env = "CHAT_PROVIDER", value_enum, default_value_t = ProviderKind::Gemini)]
    pub provider: ProviderKind,

    /// Directory served as static files at /
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,
}

impl ServerArgs {
    /// Combine the arguments with API keys from the process environment
    pub fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            public_dir: self.public_dir,
            llm: LlmConfig::from_env(self.provider),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub public_dir: PathBuf,
    pub llm: LlmConfig,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            public_dir: PathBuf::from("public"),
            llm: LlmConfig::default(),
        }
    }
}

/// Upstream provider settings.
///
/// A missing key is not an error here; it is reported when a chat request
/// needs it.
#[derive(Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
}

impl LlmConfig {
    pub fn from_env(provider: ProviderKind) -> Self {
        Self::from_lookup(provider, |name| std::env::var(name).ok())
    }

    /// Build the config reading keys through `lookup`. Empty values count as absent.
    pub fn from_lookup<F>(provider: ProviderKind, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            provider,
            gemini_api_key: key(GEMINI_API_KEY_ENV),
            openai_api_key: key(OPENAI_API_KEY_ENV),
            ..Self::default()
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            gemini_api_key: None,
            gemini_base_url: gemini::DEFAULT_BASE_URL.to_string(),
            gemini_model: gemini::DEFAULT_MODEL.to_string(),
            openai_api_key: None,
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            openai_model: openai::DEFAULT_MODEL.to_string(),
        }
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "***"))
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "***"))
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .finish()
    }
}
