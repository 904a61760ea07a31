//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{PRESENCE_TAG, Question, QuestionId, SURVEY_UPDATE_TAG, Survey};

/// Everything a page needs to render the survey and follow `/ws`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyPageDto {
    pub version: u8,
    /// `ws` or `wss`
    pub ws_protocol: String,
    pub survey_update_code: u8,
    pub presence_code: u8,
    /// Sorted by id.
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDto {
    pub id: QuestionId,
    /// `multiple_choice`, `select_all` or `text_entry`
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDto>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDto {
    pub index: usize,
    pub title: String,
    pub selected: bool,
}

/// Response of a successful `POST /admin/snapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSavedDto {
    pub bytes: usize,
    /// RFC 3339 (JST)
    pub saved_at: String,
}

impl SurveyPageDto {
    pub fn from_survey(survey: &Survey, tls: bool) -> Self {
        Self {
            version: survey.version,
            ws_protocol: if tls { "wss" } else { "ws" }.to_string(),
            survey_update_code: SURVEY_UPDATE_TAG,
            presence_code: PRESENCE_TAG,
            questions: survey.questions().map(QuestionDto::from).collect(),
        }
    }
}

impl From<(QuestionId, &Question)> for QuestionDto {
    fn from((id, question): (QuestionId, &Question)) -> Self {
        let options = question
            .options()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, option)| OptionDto {
                index,
                title: option.title.clone(),
                selected: option.selected,
            })
            .collect();

        Self {
            id,
            kind: question.question_type().as_str().to_string(),
            title: question.title().to_string(),
            options,
            text: question.text().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnswerChoice;

    #[test]
    fn test_page_dto_from_survey() {
        // テスト項目: アンケートがページ用 DTO に ID 順で変換される
        // given (前提条件):
        let survey = Survey::new(2)
            .with_question(5, Question::free_text("Comments", "nice"))
            .with_question(
                1,
                Question::single_select(
                    "Colour",
                    vec![AnswerChoice::new("Red", false), AnswerChoice::new("Blue", true)],
                ),
            );

        // when (操作):
        let dto = SurveyPageDto::from_survey(&survey, true);

        // then (期待する結果):
        assert_eq!(dto.version, 2);
        assert_eq!(dto.ws_protocol, "wss");
        assert_eq!((dto.survey_update_code, dto.presence_code), (0, 1));
        assert_eq!(dto.questions.len(), 2);
        assert_eq!(dto.questions[0].id, 1);
        assert_eq!(dto.questions[0].kind, "multiple_choice");
        assert_eq!(
            dto.questions[0].options[1],
            OptionDto {
                index: 1,
                title: "Blue".to_string(),
                selected: true
            }
        );
        assert_eq!(dto.questions[1].kind, "text_entry");
        assert_eq!(dto.questions[1].text.as_deref(), Some("nice"));
    }

    #[test]
    fn test_question_dto_json_shape() {
        // テスト項目: 自由記述には options が出力されない
        let dto = QuestionDto::from((3, &Question::free_text("Comments", "")));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "type": "text_entry", "title": "Comments", "text": ""})
        );
    }
}
