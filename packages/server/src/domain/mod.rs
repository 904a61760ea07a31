//! Domain layer: the survey model, its binary codec, and the traits the
//! outer layers implement.

mod broadcaster;
mod censor;
mod codec;
mod error;
mod frame;
mod message_pusher;
mod question;
mod repository;
mod state;
mod survey;

pub use broadcaster::Broadcaster;
pub use censor::{censor, fit_to_length};
pub use codec::{MAX_OPTIONS, MAX_TEXT_BYTES};
pub use error::{BroadcastError, CodecError, FrameError, MessagePushError, PersistenceError};
pub use frame::{Frame, PRESENCE_TAG, SURVEY_UPDATE_TAG, presence_frame};
pub use message_pusher::{CONNECTION_BUFFER, ConnectionId, MessagePusher, PusherChannel};
pub use question::{AnswerChoice, Question, QuestionType};
pub use repository::SurveyStore;
#[cfg(test)]
pub use repository::MockSurveyStore;
pub use state::{SurveyGuard, SurveyState};
pub use survey::{MergeOutcome, QuestionId, Survey};
