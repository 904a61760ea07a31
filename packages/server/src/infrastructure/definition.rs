//! Survey definition loading.
//!
//! The definition is a TOML document read once at startup:
//!
//! ```toml
//! version = 1
//!
//! [[questions]]
//! type = "MultipleChoice"
//! title = "Favourite colour?"
//! options = [{ title = "Red" }, { title = "Blue", selected = true }]
//!
//! [[questions]]
//! type = "TextEntry"
//! title = "Anything else?"
//! ```
//!
//! Question ids are assigned from 1 in document order.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{AnswerChoice, CodecError, Question, QuestionId, Survey};

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("failed to read survey definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse survey definition: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("survey definition has {0} questions (max 255)")]
    TooManyQuestions(usize),

    #[error("question #{index} ({title:?}) is invalid: {source}")]
    InvalidQuestion {
        index: usize,
        title: String,
        #[source]
        source: CodecError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SurveyDefinition {
    #[serde(default)]
    version: u8,
    #[serde(default)]
    questions: Vec<QuestionDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum QuestionDefinition {
    MultipleChoice {
        title: String,
        #[serde(default)]
        options: Vec<AnswerChoice>,
    },
    SelectAllThatApply {
        title: String,
        #[serde(default)]
        options: Vec<AnswerChoice>,
    },
    TextEntry {
        title: String,
        #[serde(default)]
        text: String,
    },
}

impl From<QuestionDefinition> for Question {
    fn from(definition: QuestionDefinition) -> Self {
        match definition {
            QuestionDefinition::MultipleChoice { title, options } => {
                Question::single_select(title, options)
            }
            QuestionDefinition::SelectAllThatApply { title, options } => {
                Question::multi_select(title, options)
            }
            QuestionDefinition::TextEntry { title, text } => Question::free_text(title, text),
        }
    }
}

/// Load the survey definition from a TOML file.
pub fn load_definition(path: &Path) -> Result<Survey, DefinitionError> {
    let content = std::fs::read_to_string(path)?;
    parse_definition(&content)
}

/// Parse a survey definition from TOML text.
///
/// Every question must be encodable, so a definition with two initial
/// selections on a `MultipleChoice` or an over-long text is rejected here
/// rather than at the first broadcast.
pub fn parse_definition(content: &str) -> Result<Survey, DefinitionError> {
    let definition: SurveyDefinition = toml::from_str(content)?;
    if definition.questions.len() > usize::from(QuestionId::MAX) {
        return Err(DefinitionError::TooManyQuestions(definition.questions.len()));
    }

    let mut survey = Survey::new(definition.version);
    for (index, question) in definition.questions.into_iter().enumerate() {
        let question = Question::from(question);
        if let Err(source) = question.encode() {
            return Err(DefinitionError::InvalidQuestion {
                index: index + 1,
                title: question.title().to_string(),
                source,
            });
        }
        // index < 255 was checked above
        survey.insert((index + 1) as QuestionId, question);
    }

    Ok(survey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuestionType;

    const SAMPLE: &str = r#"
version = 3

[[questions]]
type = "MultipleChoice"
title = "Favourite colour?"
options = [{ title = "Red" }, { title = "Blue", selected = true }]

[[questions]]
type = "SelectAllThatApply"
title = "Toppings"
options = [{ title = "Cheese" }, { title = "Olives" }, { title = "Basil" }]

[[questions]]
type = "TextEntry"
title = "Anything else?"
"#;

    #[test]
    fn test_parse_assigns_ids_in_order() {
        // テスト項目: 定義順に 1 から ID が振られる
        // given (前提条件):
        let content = SAMPLE;

        // when (操作):
        let survey = parse_definition(content).unwrap();

        // then (期待する結果):
        assert_eq!(survey.version, 3);
        let kinds: Vec<(QuestionId, QuestionType, &str)> = survey
            .questions()
            .map(|(id, q)| (id, q.question_type(), q.title()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (1, QuestionType::SingleSelect, "Favourite colour?"),
                (2, QuestionType::MultiSelect, "Toppings"),
                (3, QuestionType::FreeText, "Anything else?"),
            ]
        );
        assert_eq!(
            survey.get(1).and_then(Question::options),
            Some(&[AnswerChoice::new("Red", false), AnswerChoice::new("Blue", true)][..])
        );
        assert_eq!(survey.get(3).and_then(Question::text), Some(""));
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let content = r#"
[[questions]]
type = "Ranking"
title = "Rank these"
"#;
        assert!(matches!(
            parse_definition(content),
            Err(DefinitionError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_two_initial_selections() {
        // テスト項目: 単一選択で初期選択が 2 つある定義は読み込めない
        // given (前提条件):
        let content = r#"
[[questions]]
type = "MultipleChoice"
title = "Pick one"
options = [{ title = "A", selected = true }, { title = "B", selected = true }]
"#;

        // when (操作):
        let result = parse_definition(content);

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(DefinitionError::InvalidQuestion {
                index: 1,
                source: CodecError::MultipleSelected(2),
                ..
            })
        ));
    }

    #[test]
    fn test_parse_rejects_too_many_questions() {
        let content = "[[questions]]\ntype = \"TextEntry\"\ntitle = \"q\"\n".repeat(256);
        assert!(matches!(
            parse_definition(&content),
            Err(DefinitionError::TooManyQuestions(256))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_definition(Path::new("/nonexistent/survey.toml"));
        assert!(matches!(result, Err(DefinitionError::Io(_))));
    }
}
