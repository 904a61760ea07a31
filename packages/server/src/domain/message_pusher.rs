//! Connection registry abstraction.

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Frames a connection may have waiting for its writer task.
pub const CONNECTION_BUFFER: usize = 256;

/// Outbound frame channel of one WebSocket connection.
///
/// A writer task drains it into the socket. Sends never wait: a closed
/// channel (writer gone) or a full one (peer stopped reading) counts as a
/// broken connection.
pub type PusherChannel = mpsc::Sender<Vec<u8>>;

/// Server-assigned identity of a WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Registry of live connections and fan-out to them.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection and return the registry size afterwards.
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) -> usize;

    /// Remove a connection. Returns `false` if it was not registered.
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    async fn is_registered(&self, connection_id: &ConnectionId) -> bool;

    async fn count_clients(&self) -> usize;

    /// Push `frame` to every registered connection.
    ///
    /// Connections whose channel is closed or full are removed from the
    /// registry and returned; delivery to the others continues.
    async fn broadcast(&self, frame: &[u8]) -> Vec<ConnectionId>;
}
