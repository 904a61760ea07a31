//! Domain error types.

use thiserror::Error;

/// Failures of the survey binary codec.
///
/// Every variant is local to one encode or decode call. A failed decode never
/// leaves a partially updated target behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("too many options: {0} (max 255)")]
    TooManyOptions(usize),

    #[error("multiple options selected: {0}")]
    MultipleSelected(usize),

    #[error("no data")]
    TooFewBytes,

    #[error("invalid payload length: expected {expected} bytes, got {actual}")]
    InvalidPayloadLength { expected: usize, actual: usize },

    #[error("invalid question data: header of question #{index} is truncated")]
    Truncated { index: usize },

    #[error("question payload is too short for id {id}: declared {declared}, available {available}")]
    PayloadTooShort {
        id: u8,
        declared: usize,
        available: usize,
    },

    #[error("unknown question type {0}")]
    UnknownQuestionType(u8),

    #[error("text too long: {0} bytes (max 255)")]
    TextTooLong(usize),

    #[error("too many questions: {0} (max 255)")]
    TooManyQuestions(usize),

    #[error("no questions")]
    NoQuestions,
}

/// Failures decoding a server-to-client frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("empty frame")]
    Empty,

    #[error("unknown frame tag {0}")]
    UnknownTag(u8),

    #[error("presence frame must carry 4 bytes, got {0}")]
    InvalidPresenceLength(usize),
}

/// Failures of the persistence adapter.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to read survey snapshot: {0}")]
    Load(#[source] std::io::Error),

    #[error("failed to write survey snapshot: {0}")]
    Save(#[source] std::io::Error),
}

/// Failures pushing a frame to a single connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("connection '{0}' is closed")]
    ConnectionClosed(String),

    #[error("connection '{0}' is not reading; its buffer is full")]
    Stalled(String),
}

/// Failures enqueueing onto a broadcast queue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("{0} queue is closed")]
    QueueClosed(&'static str),
}
