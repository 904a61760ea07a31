//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    infrastructure::dto::http::{SnapshotSavedDto, SurveyPageDto},
    ui::state::AppState,
    usecase::UpdateSurveyError,
};
use kairan_shared::time::to_jst_rfc3339;

/// Survey page view (titles, options, current answers and how to follow `/ws`)
pub async fn get_survey_page(State(state): State<Arc<AppState>>) -> Json<SurveyPageDto> {
    let survey = state.get_survey_page_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(SurveyPageDto::from_survey(&survey, state.tls))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Accept a full encoded survey and merge it into the live state
pub async fn update_survey(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let len = body.len();
    match state.update_survey_usecase.execute(body.to_vec()).await {
        Ok(outcome) => {
            tracing::info!(
                "Survey update merged ({} bytes, {} question(s) applied)",
                len,
                outcome.applied.len()
            );
            (StatusCode::OK, "Survey received successfully").into_response()
        }
        Err(e @ (UpdateSurveyError::Decode(_) | UpdateSurveyError::ShapeMismatch(_))) => {
            tracing::warn!("Rejected survey update ({} bytes): {}", len, e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e @ UpdateSurveyError::Broadcast(_)) => {
            tracing::error!("Failed to broadcast survey update: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Persist the current survey state
pub async fn save_snapshot(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SnapshotSavedDto>, StatusCode> {
    match state.snapshot_survey_usecase.execute().await {
        Ok(saved) => {
            tracing::info!("Survey snapshot saved ({} bytes)", saved.bytes);
            Ok(Json(SnapshotSavedDto {
                bytes: saved.bytes,
                saved_at: to_jst_rfc3339(saved.saved_at_millis)
                    .unwrap_or_else(|| saved.saved_at_millis.to_string()),
            }))
        }
        Err(e) => {
            tracing::error!("Failed to save survey snapshot: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
