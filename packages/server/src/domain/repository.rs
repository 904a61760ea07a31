//! Persistence adapter trait.
//!
//! The store only ever sees encoded survey bytes. Implementations live in
//! the infrastructure layer.

use async_trait::async_trait;

use super::error::PersistenceError;

/// Backing store for survey snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SurveyStore: Send + Sync {
    /// Last saved encoded survey, `None` if nothing was saved yet.
    async fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError>;

    /// Replace the saved snapshot.
    async fn save(&self, encoded: &[u8]) -> Result<(), PersistenceError>;
}
