//! File SurveyStore 実装
//!
//! スナップショットは 1 ファイルにそのまま書き込みます。
//! 書き込みは隣に一時ファイルを作ってから rename するため、途中で落ちても
//! 古いスナップショットか新しいスナップショットのどちらかが残ります。

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::domain::{PersistenceError, SurveyStore};

/// ファイルに保存する SurveyStore 実装
pub struct FileSurveyStore {
    path: PathBuf,
}

impl FileSurveyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SurveyStore for FileSurveyStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, PersistenceError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Load(e)),
        }
    }

    async fn save(&self, encoded: &[u8]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(PersistenceError::Save)?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, encoded)
            .await
            .map_err(PersistenceError::Save)?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(PersistenceError::Save)?;

        tracing::debug!(
            "Saved {} byte survey snapshot to {}",
            encoded.len(),
            self.path.display()
        );
        Ok(())
    }
}
