//! Survey aggregate and its wire encoding.

use std::collections::BTreeMap;

use super::{
    error::CodecError,
    question::{Question, QuestionType},
};

const QUESTION_HEADER_LEN: usize = 3;
const MAX_QUESTIONS: usize = 255;

/// Identifier of a question within a survey.
pub type QuestionId = u8;

/// A version byte plus the questions keyed by id.
///
/// Questions iterate in ascending id order, which is also the encoding order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    pub version: u8,
    questions: BTreeMap<QuestionId, Question>,
}

/// What a merge did with each incoming question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Ids whose answers were copied into the live survey.
    pub applied: Vec<QuestionId>,
    /// Ids not present in the live survey.
    pub unknown: Vec<QuestionId>,
    /// Ids whose type or option count differs from the live question.
    pub mismatched: Vec<QuestionId>,
}

impl Survey {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            questions: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn with_question(mut self, id: QuestionId, question: Question) -> Self {
        self.questions.insert(id, question);
        self
    }

    pub fn insert(&mut self, id: QuestionId, question: Question) -> Option<Question> {
        self.questions.insert(id, question)
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.get(&id)
    }

    pub fn questions(&self) -> impl Iterator<Item = (QuestionId, &Question)> {
        self.questions.iter().map(|(id, question)| (*id, question))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Encode the survey.
    ///
    /// Layout: `[version, count]` followed by `[id, type, len, payload...]`
    /// per question.
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        if self.questions.len() > MAX_QUESTIONS {
            return Err(CodecError::TooManyQuestions(self.questions.len()));
        }

        let mut buf = Vec::with_capacity(2 + self.questions.len() * (QUESTION_HEADER_LEN + 2));
        buf.push(self.version);
        buf.push(self.questions.len() as u8);
        for (&id, question) in &self.questions {
            let payload = question.encode()?;
            buf.push(id);
            buf.push(question.question_type().tag());
            // payloads are bounded by the 255 option / 255 byte limits
            buf.push(payload.len() as u8);
            buf.extend_from_slice(&payload);
        }
        Ok(buf)
    }

    /// Decode a survey. Decoded questions are untitled.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() < QUESTION_HEADER_LEN {
            return Err(CodecError::NoQuestions);
        }

        let mut survey = Survey::new(data[0]);
        let count = usize::from(data[1]);
        let mut rest = &data[2..];

        for index in 0..count {
            let Some((header, body)) = rest.split_first_chunk::<QUESTION_HEADER_LEN>() else {
                return Err(CodecError::Truncated { index });
            };
            let [id, tag, len] = *header;
            let len = usize::from(len);
            if body.len() < len {
                return Err(CodecError::PayloadTooShort {
                    id,
                    declared: len,
                    available: body.len(),
                });
            }

            let question_type = QuestionType::try_from(tag)?;
            let (payload, remaining) = body.split_at(len);
            let question = Question::decode(question_type, payload)?;
            survey.questions.insert(id, question);
            rest = remaining;
        }

        Ok(survey)
    }

    /// Copy the answers of `incoming` into this survey.
    ///
    /// Ids missing from `incoming` are left alone and ids unknown to this
    /// survey are ignored. Question types and option counts never change.
    pub fn merge(&mut self, incoming: &Survey) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for (&id, question) in &incoming.questions {
            match self.questions.get_mut(&id) {
                Some(live) => {
                    if live.absorb_answers(question) {
                        outcome.applied.push(id);
                    } else {
                        outcome.mismatched.push(id);
                    }
                }
                None => outcome.unknown.push(id),
            }
        }
        outcome
    }

    /// Ids of `incoming` whose variant or option count differs from this survey.
    ///
    /// Unknown ids are not reported.
    pub fn mismatched(&self, incoming: &Survey) -> Vec<QuestionId> {
        incoming
            .questions
            .iter()
            .filter(|(id, question)| {
                self.questions
                    .get(id)
                    .is_some_and(|live| !live.same_shape(question))
            })
            .map(|(&id, _)| id)
            .collect()
    }
}
