//! UseCase 層
//!
//! ドメインのトレイトだけに依存し、実装は `Arc<dyn Trait>` で受け取る。

mod connect_client;
mod disconnect_client;
mod error;
mod get_survey_page;
mod restore_survey;
mod snapshot_survey;
mod update_survey;

#[cfg(test)]
mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::{DisconnectClientUseCase, Disconnected};
pub use error::{ConnectError, RestoreError, SnapshotError, UpdateSurveyError};
pub use get_survey_page::GetSurveyPageUseCase;
pub use restore_survey::{RestoreSurveyUseCase, Restored};
pub use snapshot_survey::{SnapshotSaved, SnapshotSurveyUseCase};
pub use update_survey::UpdateSurveyUseCase;
