//! Question model.
//!
//! A survey question is one of a closed set of variants. The variant travels
//! on the wire as a one-byte [`QuestionType`] tag; titles never do, they only
//! come from the survey definition.

use serde::{Deserialize, Serialize};

use super::{
    codec::{decode_selections, decode_text, encode_selections, encode_text, ensure_single_selection},
    error::CodecError,
};

/// Wire tag of a question variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    SingleSelect,
    MultiSelect,
    FreeText,
}

impl QuestionType {
    pub const fn tag(self) -> u8 {
        match self {
            QuestionType::SingleSelect => 0,
            QuestionType::MultiSelect => 1,
            QuestionType::FreeText => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            QuestionType::SingleSelect => "multiple_choice",
            QuestionType::MultiSelect => "select_all",
            QuestionType::FreeText => "text_entry",
        }
    }
}

impl TryFrom<u8> for QuestionType {
    type Error = CodecError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(QuestionType::SingleSelect),
            1 => Ok(QuestionType::MultiSelect),
            2 => Ok(QuestionType::FreeText),
            other => Err(CodecError::UnknownQuestionType(other)),
        }
    }
}

/// One option of a select question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerChoice {
    pub title: String,
    #[serde(default)]
    pub selected: bool,
}

impl AnswerChoice {
    pub fn new(title: impl Into<String>, selected: bool) -> Self {
        Self {
            title: title.into(),
            selected,
        }
    }

    /// Option decoded from the wire, which carries no title.
    pub fn untitled(selected: bool) -> Self {
        Self {
            title: String::new(),
            selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    /// At most one option selected.
    SingleSelect {
        title: String,
        options: Vec<AnswerChoice>,
    },
    MultiSelect {
        title: String,
        options: Vec<AnswerChoice>,
    },
    /// Free text, at most 255 UTF-8 bytes, censored on every write.
    FreeText { title: String, text: String },
}

impl Question {
    pub fn single_select(title: impl Into<String>, options: Vec<AnswerChoice>) -> Self {
        Question::SingleSelect {
            title: title.into(),
            options,
        }
    }

    pub fn multi_select(title: impl Into<String>, options: Vec<AnswerChoice>) -> Self {
        Question::MultiSelect {
            title: title.into(),
            options,
        }
    }

    pub fn free_text(title: impl Into<String>, text: impl Into<String>) -> Self {
        Question::FreeText {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Untitled question with no answer data, used as a decode target.
    pub fn blank(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::SingleSelect => Question::single_select("", Vec::new()),
            QuestionType::MultiSelect => Question::multi_select("", Vec::new()),
            QuestionType::FreeText => Question::free_text("", ""),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Question::SingleSelect { title, .. }
            | Question::MultiSelect { title, .. }
            | Question::FreeText { title, .. } => title,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Question::SingleSelect { .. } => QuestionType::SingleSelect,
            Question::MultiSelect { .. } => QuestionType::MultiSelect,
            Question::FreeText { .. } => QuestionType::FreeText,
        }
    }

    /// Options of a select question, `None` for free text.
    pub fn options(&self) -> Option<&[AnswerChoice]> {
        match self {
            Question::SingleSelect { options, .. } | Question::MultiSelect { options, .. } => {
                Some(options)
            }
            Question::FreeText { .. } => None,
        }
    }

    /// Text of a free-text question, `None` for select questions.
    pub fn text(&self) -> Option<&str> {
        match self {
            Question::FreeText { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Encode the answer data of this question.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        match self {
            Question::SingleSelect { options, .. } => {
                ensure_single_selection(options.iter().map(|o| o.selected))?;
                encode_selections(options.iter().map(|o| o.selected))
            }
            Question::MultiSelect { options, .. } => {
                encode_selections(options.iter().map(|o| o.selected))
            }
            Question::FreeText { text, .. } => encode_text(text),
        }
    }

    /// Decode a payload into a fresh, untitled question of the given type.
    pub fn decode(question_type: QuestionType, payload: &[u8]) -> Result<Self, CodecError> {
        let mut question = Question::blank(question_type);
        question.decode_in_place(payload)?;
        Ok(question)
    }

    /// Overwrite the answer data of this question from a payload.
    ///
    /// The payload is fully validated before anything is written; on error
    /// `self` is unchanged. Option titles survive for indices that still
    /// exist after decoding.
    pub fn decode_in_place(&mut self, payload: &[u8]) -> Result<(), CodecError> {
        match self {
            Question::SingleSelect { options, .. } => {
                let selections = decode_selections(payload)?;
                ensure_single_selection(selections.iter().copied())?;
                apply_selections(options, &selections);
            }
            Question::MultiSelect { options, .. } => {
                let selections = decode_selections(payload)?;
                apply_selections(options, &selections);
            }
            Question::FreeText { text, .. } => {
                *text = decode_text(payload)?;
            }
        }
        Ok(())
    }

    /// Same variant and, for select questions, the same option count.
    pub fn same_shape(&self, other: &Question) -> bool {
        match (self, other) {
            (Question::SingleSelect { options: a, .. }, Question::SingleSelect { options: b, .. })
            | (Question::MultiSelect { options: a, .. }, Question::MultiSelect { options: b, .. }) => {
                a.len() == b.len()
            }
            (Question::FreeText { .. }, Question::FreeText { .. }) => true,
            _ => false,
        }
    }

    /// Copy the answer data of `incoming` into this question.
    ///
    /// Returns `false` and leaves `self` untouched when the shapes differ
    /// (other variant, or a different option count).
    pub fn absorb_answers(&mut self, incoming: &Question) -> bool {
        if !self.same_shape(incoming) {
            return false;
        }
        match (self, incoming) {
            (
                Question::SingleSelect { options: live, .. },
                Question::SingleSelect { options: new, .. },
            )
            | (
                Question::MultiSelect { options: live, .. },
                Question::MultiSelect { options: new, .. },
            ) => {
                for (live_option, new_option) in live.iter_mut().zip(new) {
                    live_option.selected = new_option.selected;
                }
                true
            }
            (Question::FreeText { text: live, .. }, Question::FreeText { text: new, .. }) => {
                live.clone_from(new);
                true
            }
            _ => false,
        }
    }
}

fn apply_selections(options: &mut Vec<AnswerChoice>, selections: &[bool]) {
    options.truncate(selections.len());
    for (i, &selected) in selections.iter().enumerate() {
        match options.get_mut(i) {
            Some(option) => option.selected = selected,
            None => options.push(AnswerChoice::untitled(selected)),
        }
    }
}
