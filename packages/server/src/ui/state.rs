//! Server state and connection management.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, mpsc};

use crate::{
    config::LlmConfig,
    domain::{ChatGateway, ConnectionId, Participant, RoomRepository},
    infrastructure::{llm::LlmClient, repository::InMemoryRoomRepository},
};

/// Client connection information
pub struct ClientInfo {
    /// Message sender channel
    pub sender: mpsc::UnboundedSender<String>,
    /// The connection and the rooms it has joined
    pub participant: Participant,
}

/// Shared application state
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RoomRepository>,
    /// WebSocket sender channels for broadcasting (shared with Repository)
    pub connected_clients: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>,
    /// Upstream language-model provider
    pub chat_gateway: Arc<dyn ChatGateway>,
}

impl AppState {
    /// Build the state with an in-memory repository and the given gateway
    pub fn new(chat_gateway: Arc<dyn ChatGateway>) -> Self {
        let connected_clients = Arc::new(Mutex::new(HashMap::new()));
        let repository = Arc::new(InMemoryRoomRepository::new(connected_clients.clone()));
        Self {
            repository,
            connected_clients,
            chat_gateway,
        }
    }

    /// Build the state with the provider selected in `config`
    pub fn from_config(config: &LlmConfig) -> Self {
        Self::new(Arc::new(LlmClient::from_config(config)))
    }
}
