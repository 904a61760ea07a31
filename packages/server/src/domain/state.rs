//! Live survey state.

use tokio::sync::{Mutex, MutexGuard};

use super::{
    error::CodecError,
    survey::{MergeOutcome, QuestionId, Survey},
};

/// The single source of truth for the live survey.
///
/// All reads and writes go through one mutex. The survey itself is never
/// handed out by reference; callers get copies or encoded bytes.
pub struct SurveyState {
    survey: Mutex<Survey>,
}

/// Exclusive access to the live survey for one critical section.
///
/// Lets a caller combine a merge or an encode with other work (queueing a
/// broadcast, registering a connection) without another writer interleaving.
pub struct SurveyGuard<'a> {
    survey: MutexGuard<'a, Survey>,
}

impl SurveyGuard<'_> {
    pub fn merge(&mut self, incoming: &Survey) -> MergeOutcome {
        self.survey.merge(incoming)
    }

    /// Known ids of `incoming` whose shape differs from the live survey.
    pub fn mismatched(&self, incoming: &Survey) -> Vec<QuestionId> {
        self.survey.mismatched(incoming)
    }

    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        self.survey.encode()
    }

    pub fn snapshot(&self) -> Survey {
        self.survey.clone()
    }
}

impl SurveyState {
    pub fn new(survey: Survey) -> Self {
        Self {
            survey: Mutex::new(survey),
        }
    }

    pub async fn lock(&self) -> SurveyGuard<'_> {
        SurveyGuard {
            survey: self.survey.lock().await,
        }
    }

    pub async fn merge(&self, incoming: &Survey) -> MergeOutcome {
        self.lock().await.merge(incoming)
    }

    pub async fn encode(&self) -> Result<Vec<u8>, CodecError> {
        self.lock().await.encode()
    }

    /// Copy of the current survey, titles included.
    pub async fn snapshot(&self) -> Survey {
        self.lock().await.snapshot()
    }
}
