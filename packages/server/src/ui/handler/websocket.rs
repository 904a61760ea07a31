//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{CONNECTION_BUFFER, ConnectionId},
    ui::state::AppState,
    usecase::ConnectError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drains the connection's outbound channel into the WebSocket sink.
///
/// Ends when the sink fails or when every sender is gone, i.e. the
/// connection was removed from the registry. A write blocked on a peer that
/// stopped reading is cut off by the liveness loop once the fan-out has
/// dropped the connection for a full buffer.
fn pusher_loop(
    mut rx: mpsc::Receiver<Vec<u8>>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Binary(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Watches the connection until it closes or is deregistered.
///
/// Incoming messages are ignored; they only prove the peer is alive.
fn liveness_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match tokio::time::timeout(state.liveness_interval, receiver.next()).await {
                Ok(None) | Ok(Some(Ok(Message::Close(_)))) => {
                    tracing::info!("Connection '{}' closed by peer", connection_id);
                    break;
                }
                Ok(Some(Err(e))) => {
                    tracing::debug!("Connection '{}' read error: {}", connection_id, e);
                    break;
                }
                Ok(Some(Ok(_))) | Err(_) => {}
            }

            if !state.connect_client_usecase.is_connected(&connection_id).await {
                tracing::info!("Connection '{}' was dropped from the registry", connection_id);
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::channel(CONNECTION_BUFFER);

    match state.connect_client_usecase.execute(connection_id, tx).await {
        Ok(count) => {
            tracing::info!("Connection '{}' registered ({} connected)", connection_id, count);
        }
        Err(ConnectError::Broadcast(e)) => {
            tracing::warn!(
                "Connection '{}' registered but presence was not broadcast: {}",
                connection_id,
                e
            );
        }
        Err(e) => {
            tracing::warn!("Failed to connect '{}': {}", connection_id, e);
            return;
        }
    }

    let (sender, receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = liveness_loop(receiver, state.clone(), connection_id);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    match state.disconnect_client_usecase.execute(connection_id).await {
        Ok(disconnected) => {
            tracing::info!(
                "Connection '{}' disconnected ({} remaining)",
                connection_id,
                disconnected.remaining
            );
        }
        Err(e) => {
            tracing::warn!("Failed to broadcast presence after '{}' left: {}", connection_id, e);
        }
    }
}
