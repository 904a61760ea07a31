//! Error types for the survey watcher.

use kairan_server::domain::{CodecError, FrameError};
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The WebSocket handshake failed
    #[error("Connection error: {0}")]
    Connection(#[from] tokio_tungstenite::tungstenite::Error),

    /// The server closed the connection or the read failed
    #[error("Connection lost")]
    ConnectionLost,

    /// A frame could not be decoded
    #[error("Malformed frame: {0}")]
    Frame(#[from] FrameError),

    /// A survey frame carried a malformed survey
    #[error("Malformed survey: {0}")]
    Survey(#[from] CodecError),

    /// Every reconnect attempt failed
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}
