//! UseCase: アンケートのスナップショット保存処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SnapshotSurveyUseCase::execute() メソッド
//! - 現在の状態のエンコードと SurveyStore への保存
//!
//! ### どのような状況を想定しているか
//! - 正常系：保存成功（保存時刻は Clock から取得）
//! - 異常系：保存失敗

use std::sync::Arc;

use kairan_shared::time::Clock;

use crate::domain::{SurveyState, SurveyStore};

use super::error::SnapshotError;

/// 保存結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSaved {
    /// 保存したバイト数
    pub bytes: usize,
    /// 保存時刻（Unix ミリ秒）
    pub saved_at_millis: i64,
}

/// スナップショット保存のユースケース
pub struct SnapshotSurveyUseCase {
    state: Arc<SurveyState>,
    store: Arc<dyn SurveyStore>,
    clock: Arc<dyn Clock>,
}

impl SnapshotSurveyUseCase {
    pub fn new(state: Arc<SurveyState>, store: Arc<dyn SurveyStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            state,
            store,
            clock,
        }
    }

    /// 現在の状態を保存する
    ///
    /// エンコードはロックの中、書き込みはロックの外で行う。
    pub async fn execute(&self) -> Result<SnapshotSaved, SnapshotError> {
        let encoded = self.state.encode().await.map_err(SnapshotError::Encode)?;
        self.store.save(&encoded).await?;

        Ok(SnapshotSaved {
            bytes: encoded.len(),
            saved_at_millis: self.clock.now_millis(),
        })
    }
}
