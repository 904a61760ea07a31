//! UseCase: アンケート更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateSurveyUseCase::execute() メソッド
//! - 受信したバイト列のデコード、現在の状態へのマージ、ブロードキャストへの投入
//!
//! ### なぜこのテストが必要か
//! - 不正なペイロードで状態が変わったり、配信されたりしてはいけない
//! - キューへの投入順がマージ順と一致する必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：回答の更新
//! - 異常系：デコードできないペイロード、型や選択肢数の合わない質問を含む更新、閉じたキュー
//! - エッジケース：定義にない質問を含む更新

use std::sync::Arc;

use crate::domain::{Broadcaster, MergeOutcome, Survey, SurveyState};

use super::error::UpdateSurveyError;

/// アンケート更新のユースケース
pub struct UpdateSurveyUseCase {
    /// アンケートの現在の状態
    state: Arc<SurveyState>,
    /// Broadcaster（ブロードキャストキューの抽象化）
    broadcaster: Arc<dyn Broadcaster>,
}

impl UpdateSurveyUseCase {
    pub fn new(state: Arc<SurveyState>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self { state, broadcaster }
    }

    /// アンケート更新を実行
    ///
    /// 1. ロックの外で受信したバイト列をデコード（失敗したら何もしない）
    /// 2. ロックを取得し、既知の質問の型・選択肢数がすべて一致するか確認（不一致なら何もしない）
    /// 3. 現在の状態にマージ
    /// 4. 同じロックの中で、受信したバイト列をそのまま配信キューに投入
    ///
    /// # Returns
    ///
    /// * `Ok(MergeOutcome)` - 反映された質問・無視された質問
    /// * `Err(UpdateSurveyError)` - デコード失敗、質問の形の不一致、またはキューの停止
    pub async fn execute(&self, raw: Vec<u8>) -> Result<MergeOutcome, UpdateSurveyError> {
        let incoming = Survey::decode(&raw).map_err(UpdateSurveyError::Decode)?;

        let mut survey = self.state.lock().await;
        let mismatched = survey.mismatched(&incoming);
        if !mismatched.is_empty() {
            return Err(UpdateSurveyError::ShapeMismatch(mismatched));
        }
        let outcome = survey.merge(&incoming);
        if !outcome.unknown.is_empty() {
            tracing::warn!("Ignored unknown questions in update: {:?}", outcome.unknown);
        }
        self.broadcaster.enqueue_survey(raw).await?;
        drop(survey);

        Ok(outcome)
    }
}
