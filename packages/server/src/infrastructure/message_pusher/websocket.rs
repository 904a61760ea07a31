//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `PusherChannel` をレジストリとして管理
//! - 全接続へのフレーム配信（broadcast）
//!
//! ## 設計ノート
//!
//! ソケットへの書き込みは UI 層（`ui/handler/websocket.rs`）の writer タスクが行います。
//! ここではチャンネルへの送信だけを行うため、レジストリのロック中にネットワーク I/O は発生しません。
//! 送信は待たずに `try_send` で行います。writer タスクが終了した接続（チャンネルが閉じている）と、
//! 読み取りを止めた接続（チャンネルが満杯）は、その時点でレジストリから外します。
//! 外された接続は liveness ループが登録解除を検知して閉じ、クライアントは再接続で最新のスナップショットを受け取ります。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信チャンネル
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

fn deliver(
    connection_id: &ConnectionId,
    sender: &PusherChannel,
    frame: &[u8],
) -> Result<(), MessagePushError> {
    sender.try_send(frame.to_vec()).map_err(|e| match e {
        TrySendError::Full(_) => MessagePushError::Stalled(connection_id.to_string()),
        TrySendError::Closed(_) => MessagePushError::ConnectionClosed(connection_id.to_string()),
    })
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) -> usize {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.len()
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let removed = self.clients.lock().await.remove(connection_id).is_some();
        if removed {
            tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
        }
        removed
    }

    async fn is_registered(&self, connection_id: &ConnectionId) -> bool {
        self.clients.lock().await.contains_key(connection_id)
    }

    async fn count_clients(&self) -> usize {
        self.clients.lock().await.len()
    }

    async fn broadcast(&self, frame: &[u8]) -> Vec<ConnectionId> {
        let mut clients = self.clients.lock().await;

        // 送信に失敗した接続だけを外し、残りへの配信は続ける
        let mut dropped = Vec::new();
        for (connection_id, sender) in clients.iter() {
            if let Err(e) = deliver(connection_id, sender, frame) {
                tracing::warn!("Dropping connection during broadcast: {}", e);
                dropped.push(*connection_id);
            }
        }
        for connection_id in &dropped {
            clients.remove(connection_id);
        }

        tracing::debug!(
            "Broadcasted {} byte frame to {} connection(s)",
            frame.len(),
            clients.len()
        );
        dropped
    }
}
