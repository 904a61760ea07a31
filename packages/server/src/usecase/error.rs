//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{BroadcastError, CodecError, PersistenceError, QuestionId};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("failed to encode survey snapshot: {0}")]
    Snapshot(#[source] CodecError),

    #[error("connection closed before the initial frames were queued")]
    ConnectionClosed,

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),
}

/// アンケート更新処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateSurveyError {
    #[error("malformed survey update: {0}")]
    Decode(#[source] CodecError),

    #[error("survey update does not match the live questions {0:?}")]
    ShapeMismatch(Vec<QuestionId>),

    #[error(transparent)]
    Broadcast(#[from] BroadcastError),
}

/// 起動時の復元処理のエラー
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error(transparent)]
    Load(#[from] PersistenceError),

    #[error("saved survey snapshot is malformed: {0}")]
    Decode(#[source] CodecError),
}

/// スナップショット保存処理のエラー
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode survey snapshot: {0}")]
    Encode(#[source] CodecError),

    #[error(transparent)]
    Save(#[from] PersistenceError),
}
