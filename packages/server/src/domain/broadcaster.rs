//! Broadcast queue abstraction.

use async_trait::async_trait;

use super::error::BroadcastError;

/// Producer side of the two broadcast queues.
///
/// Both methods wait while their queue is full; nothing is dropped.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Queue an encoded survey for every connection.
    async fn enqueue_survey(&self, encoded: Vec<u8>) -> Result<(), BroadcastError>;

    /// Queue a presence count for every connection.
    async fn enqueue_presence(&self, count: usize) -> Result<(), BroadcastError>;
}
