//! Test doubles shared by the UseCase tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{BroadcastError, Broadcaster};

/// Broadcaster that records what was enqueued instead of delivering it.
#[derive(Default)]
pub struct RecordingBroadcaster {
    surveys: Mutex<Vec<Vec<u8>>>,
    presence: Mutex<Vec<usize>>,
}

impl RecordingBroadcaster {
    pub async fn surveys(&self) -> Vec<Vec<u8>> {
        self.surveys.lock().await.clone()
    }

    pub async fn presence(&self) -> Vec<usize> {
        self.presence.lock().await.clone()
    }
}

#[async_trait]
impl Broadcaster for RecordingBroadcaster {
    async fn enqueue_survey(&self, encoded: Vec<u8>) -> Result<(), BroadcastError> {
        self.surveys.lock().await.push(encoded);
        Ok(())
    }

    async fn enqueue_presence(&self, count: usize) -> Result<(), BroadcastError> {
        self.presence.lock().await.push(count);
        Ok(())
    }
}

/// Broadcaster whose queues are already closed.
pub struct ClosedBroadcaster;

#[async_trait]
impl Broadcaster for ClosedBroadcaster {
    async fn enqueue_survey(&self, _encoded: Vec<u8>) -> Result<(), BroadcastError> {
        Err(BroadcastError::QueueClosed("survey"))
    }

    async fn enqueue_presence(&self, _count: usize) -> Result<(), BroadcastError> {
        Err(BroadcastError::QueueClosed("presence"))
    }
}
