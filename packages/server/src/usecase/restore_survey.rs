//! UseCase: 起動時のアンケート復元処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RestoreSurveyUseCase::execute() メソッド
//! - 保存済みスナップショットの読み込み、デコード、現在の状態へのマージ
//!
//! ### どのような状況を想定しているか
//! - 正常系：スナップショットあり / なし
//! - 異常系：読み込み失敗、壊れたスナップショット（どちらも状態は変わらない）

use std::sync::Arc;

use crate::domain::{MergeOutcome, Survey, SurveyState, SurveyStore};

use super::error::RestoreError;

/// 復元処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restored {
    /// 保存済みのスナップショットがなかった
    NothingSaved,
    /// スナップショットをマージした
    Merged(MergeOutcome),
}

/// アンケート復元のユースケース
pub struct RestoreSurveyUseCase {
    state: Arc<SurveyState>,
    store: Arc<dyn SurveyStore>,
}

impl RestoreSurveyUseCase {
    pub fn new(state: Arc<SurveyState>, store: Arc<dyn SurveyStore>) -> Self {
        Self { state, store }
    }

    /// 保存済みの回答を現在の状態にマージする
    ///
    /// 定義ファイルのタイトルは残り、回答だけが置き換わる。
    pub async fn execute(&self) -> Result<Restored, RestoreError> {
        let Some(encoded) = self.store.load().await? else {
            return Ok(Restored::NothingSaved);
        };
        let saved = Survey::decode(&encoded).map_err(RestoreError::Decode)?;
        let outcome = self.state.merge(&saved).await;
        Ok(Restored::Merged(outcome))
    }
}
