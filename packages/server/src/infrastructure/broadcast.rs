//! Broadcast queues and their fan-out tasks.
//!
//! Two bounded queues decouple the request handlers from delivery: one for
//! survey updates, one for presence counts. Each queue has exactly one
//! consumer task, so frames reach every connection in enqueue order within a
//! queue. There is no ordering between the two queues.
//!
//! Producers wait when a queue is full. The fan-out never waits on a single
//! connection: a connection whose own buffer (`CONNECTION_BUFFER` frames) is
//! full is dropped from the registry and gets a fresh snapshot when it
//! reconnects. Memory held for a stalled client is bounded by that buffer.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::{BroadcastError, Broadcaster, Frame, MessagePusher, presence_frame};

pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

const SURVEY_QUEUE: &str = "survey";
const PRESENCE_QUEUE: &str = "presence";

/// Producer handle for the two broadcast queues.
#[derive(Clone)]
pub struct QueuedBroadcaster {
    survey_tx: mpsc::Sender<Vec<u8>>,
    presence_tx: mpsc::Sender<usize>,
}

/// The two fan-out tasks.
pub struct FanOutWorkers {
    survey: JoinHandle<()>,
    presence: JoinHandle<()>,
}

impl FanOutWorkers {
    /// Stop both tasks and wait for them to finish.
    pub async fn shutdown(self) {
        self.survey.abort();
        self.presence.abort();
        let _ = self.survey.await;
        let _ = self.presence.await;
    }
}

impl QueuedBroadcaster {
    /// Create both queues with `capacity` slots each and spawn their consumers.
    pub fn spawn(pusher: Arc<dyn MessagePusher>, capacity: usize) -> (Self, FanOutWorkers) {
        let capacity = capacity.max(1);
        let (survey_tx, survey_rx) = mpsc::channel(capacity);
        let (presence_tx, presence_rx) = mpsc::channel(capacity);

        let survey = tokio::spawn(fan_out(
            survey_rx,
            pusher.clone(),
            SURVEY_QUEUE,
            |encoded: Vec<u8>| Frame::SurveyUpdate(encoded).encode(),
        ));
        let presence = tokio::spawn(fan_out(presence_rx, pusher, PRESENCE_QUEUE, presence_frame));

        (
            Self {
                survey_tx,
                presence_tx,
            },
            FanOutWorkers { survey, presence },
        )
    }
}

#[async_trait]
impl Broadcaster for QueuedBroadcaster {
    async fn enqueue_survey(&self, encoded: Vec<u8>) -> Result<(), BroadcastError> {
        self.survey_tx
            .send(encoded)
            .await
            .map_err(|_| BroadcastError::QueueClosed(SURVEY_QUEUE))
    }

    async fn enqueue_presence(&self, count: usize) -> Result<(), BroadcastError> {
        self.presence_tx
            .send(count)
            .await
            .map_err(|_| BroadcastError::QueueClosed(PRESENCE_QUEUE))
    }
}

async fn fan_out<T, F>(
    mut rx: mpsc::Receiver<T>,
    pusher: Arc<dyn MessagePusher>,
    queue: &'static str,
    to_frame: F,
) where
    T: Send + 'static,
    F: Fn(T) -> Vec<u8> + Send + 'static,
{
    while let Some(item) = rx.recv().await {
        let frame = to_frame(item);
        let dropped = pusher.broadcast(&frame).await;
        if !dropped.is_empty() {
            tracing::info!(
                "Removed {} broken connection(s) while fanning out {} frame",
                dropped.len(),
                queue
            );
        }
    }
    tracing::info!("{} fan-out stopped", queue);
}
