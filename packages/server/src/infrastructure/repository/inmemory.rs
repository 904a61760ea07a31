//! InMemory SurveyStore 実装
//!
//! プロセスが終了すると保存内容は失われます。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PersistenceError, SurveyStore};

/// インメモリ SurveyStore 実装
#[derive(Default)]
pub struct InMemorySurveyStore {
    snapshot: Mutex<Option<Vec<u8>>>,
}

impl InMemorySurveyStore {
    /// 保存済みのスナップショットを持った状態で作成
    pub fn with_snapshot(encoded: Vec<u8>) -> Self {
        Self {
            snapshot: Mutex::new(Some(encoded)),
        }
    }
}

#[async_trait]
impl SurveyStore for InMemorySurveyStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.snapshot.lock().await.clone())
    }

    async fn save(&self, encoded: &[u8]) -> Result<(), PersistenceError> {
        *self.snapshot.lock().await = Some(encoded.to_vec());
        Ok(())
    }
}
