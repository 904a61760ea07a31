//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, GetSurveyPageUseCase, SnapshotSurveyUseCase,
    UpdateSurveyUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（クライアント接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（クライアント切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// UpdateSurveyUseCase（アンケート更新のユースケース）
    pub update_survey_usecase: Arc<UpdateSurveyUseCase>,
    /// GetSurveyPageUseCase（ページ表示用アンケート取得のユースケース）
    pub get_survey_page_usecase: Arc<GetSurveyPageUseCase>,
    /// SnapshotSurveyUseCase（スナップショット保存のユースケース）
    pub snapshot_survey_usecase: Arc<SnapshotSurveyUseCase>,
    /// ページに `wss` を案内するか
    pub tls: bool,
    /// 接続の生存確認の間隔
    pub liveness_interval: Duration,
}
