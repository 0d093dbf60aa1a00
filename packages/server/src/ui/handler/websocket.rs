//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use dungeon_relay_shared::time::get_jst_timestamp;
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Timestamp},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, JoinRoomUseCase,
        RelaySensorUseCase,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    // Create a channel for this connection to receive relayed events
    let (tx, mut rx) = mpsc::unbounded_channel();

    let connect_usecase = ConnectParticipantUseCase::new(state.repository.clone());
    let connection_id = match connect_usecase.execute(tx).await {
        Ok(participant) => participant.id,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return;
        }
    };
    tracing::info!("Connection '{}' established", connection_id);

    let (mut sender, mut receiver) = socket.split();

    let connection_id_clone = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", connection_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_event(&state_clone, &connection_id_clone, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to forward relayed events to this connection
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let disconnect_usecase = DisconnectParticipantUseCase::new(state.repository.clone());
    match disconnect_usecase.execute(&connection_id).await {
        Ok(participant) => {
            let now = Timestamp::new(get_jst_timestamp());
            tracing::info!(
                "Connection '{}' closed after {}ms, left {} room(s); {} connection(s) remain",
                connection_id,
                participant.connected_for_millis(now),
                participant.rooms.len(),
                disconnect_usecase.count_remaining_participants().await
            );
        }
        Err(e) => {
            tracing::warn!("Failed to disconnect '{}': {}", connection_id, e);
        }
    }
}

/// Dispatch one text frame received from `connection_id`.
///
/// Frames that fail to parse are logged and dropped; the connection stays open.
async fn handle_client_event(state: &AppState, connection_id: &ConnectionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring malformed frame from '{}': {}", connection_id, e);
            return;
        }
    };

    match event {
        ClientEvent::Join(room) => {
            let join_usecase = JoinRoomUseCase::new(state.repository.clone());
            match join_usecase.execute(connection_id, room).await {
                Ok(room) => tracing::info!("Connection '{}' joined room '{}'", connection_id, room),
                Err(e) => tracing::warn!("Join from '{}' ignored: {}", connection_id, e),
            }
        }
        ClientEvent::Sensor(data) => {
            let relay_usecase = RelaySensorUseCase::new(state.repository.clone());
            let targets = match relay_usecase.execute(connection_id).await {
                Ok(targets) => targets,
                Err(e) => {
                    tracing::warn!("Sensor event from '{}' ignored: {}", connection_id, e);
                    return;
                }
            };
            if targets.is_empty() {
                return;
            }

            let event = ServerEvent::SensorUpdate(data.unwrap_or_default());
            let payload = match serde_json::to_string(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::error!("Failed to serialize sensor_update: {}", e);
                    return;
                }
            };
            deliver(state, &targets, &payload).await;
        }
    }
}

/// Push a serialized event to each target's outbound channel
async fn deliver(state: &AppState, targets: &[ConnectionId], payload: &str) {
    let clients = state.connected_clients.lock().await;
    for target_id in targets {
        if let Some(client_info) = clients.get(target_id)
            && client_info.sender.send(payload.to_string()).is_err()
        {
            tracing::warn!("Failed to send message to connection '{}'", target_id);
        }
    }
}
