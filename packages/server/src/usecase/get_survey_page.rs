//! UseCase: ページ表示用のアンケート取得

use std::sync::Arc;

use crate::domain::{Survey, SurveyState};

/// ページ表示用にアンケートのコピーを返すユースケース
pub struct GetSurveyPageUseCase {
    state: Arc<SurveyState>,
}

impl GetSurveyPageUseCase {
    pub fn new(state: Arc<SurveyState>) -> Self {
        Self { state }
    }

    /// タイトルを含む現在のアンケートのコピー
    pub async fn execute(&self) -> Survey {
        self.state.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnswerChoice, Question};

    #[tokio::test]
    async fn test_page_reflects_merged_answers() {
        // テスト項目: マージ後の回答がタイトル付きで返される
        // given (前提条件):
        let state = Arc::new(SurveyState::new(Survey::new(1).with_question(
            1,
            Question::single_select(
                "Colour",
                vec![AnswerChoice::new("Red", true), AnswerChoice::new("Blue", false)],
            ),
        )));
        let usecase = GetSurveyPageUseCase::new(state.clone());
        let update = Survey::decode(&[1, 1, 1, 0, 2, 2, 0b0100_0000]).unwrap();
        state.merge(&update).await;

        // when (操作):
        let survey = usecase.execute().await;

        // then (期待する結果):
        let options = survey.get(1).unwrap().options().unwrap();
        assert_eq!(options[1].title, "Blue");
        assert!(options[1].selected);
        assert!(!options[0].selected);
    }
}
