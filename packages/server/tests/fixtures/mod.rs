//! Shared fixtures for integration tests.
//!
//! `TestServer` runs the application in-process on an ephemeral port;
//! `FakeUpstream` stands in for the language-model provider and records
//! every request it receives.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
};
use dungeon_relay_server::{
    config::{LlmConfig, ProviderKind},
    domain::RoomRepository,
    ui::{self, state::AppState},
};
use tokio::{net::TcpListener, sync::oneshot};

/// Application server running on `127.0.0.1:<ephemeral>`
pub struct TestServer {
    addr: SocketAddr,
    pub state: Arc<AppState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start(llm: LlmConfig) -> Self {
        Self::start_with_public_dir(llm, PathBuf::from("public")).await
    }

    pub async fn start_with_public_dir(llm: LlmConfig, public_dir: PathBuf) -> Self {
        let state = Arc::new(AppState::from_config(&llm));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server_state = state.clone();
        tokio::spawn(async move {
            let shutdown = async {
                let _ = shutdown_rx.await;
            };
            ui::serve(listener, server_state, &public_dir, shutdown)
                .await
                .expect("Test server failed");
        });

        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Wait until `room` has exactly `count` members
    pub async fn wait_for_room_members(&self, room: &str, count: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            if self.state.repository.get_room_members(room).await.len() == count {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "room '{room}' never reached {count} members"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Wait until exactly `count` WebSocket connections are registered
    pub async fn wait_for_connections(&self, count: usize) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            if self.state.repository.count_connected_clients().await == count {
                return;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "server never reached {count} connections"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// A request captured by [`FakeUpstream`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct UpstreamState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Fake provider answering every request with a canned status and body
pub struct FakeUpstream {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeUpstream {
    pub async fn start(status: StatusCode, body: impl Into<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = UpstreamState {
            status,
            body: body.into(),
            requests: requests.clone(),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake upstream failed");
        });

        Self { addr, requests }
    }

    pub async fn json(status: StatusCode, body: serde_json::Value) -> Self {
        Self::start(status, body.to_string()).await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("poisoned").clone()
    }

    /// Config pointing Gemini at this fake
    pub fn gemini_config(&self, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider: ProviderKind::Gemini,
            gemini_api_key: api_key.map(str::to_string),
            gemini_base_url: self.base_url(),
            ..LlmConfig::default()
        }
    }

    /// Config pointing OpenAI at this fake
    pub fn openai_config(&self, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            provider: ProviderKind::OpenAi,
            openai_api_key: api_key.map(str::to_string),
            openai_base_url: self.base_url(),
            ..LlmConfig::default()
        }
    }
}

async fn record(
    State(state): State<UpstreamState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let recorded = RecordedRequest {
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    };
    state.requests.lock().expect("poisoned").push(recorded);
    (state.status, state.body.clone())
}
