use super::state::AppState;
use crate::error::RecorderError;
use crate::session::ArtifactDescription;
use crate::status::StatusEvent;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PermissionResponse {
    pub state: crate::permission::PermissionState,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a recorder error to the HTTP status code callers key off.
fn error_status(err: &RecorderError) -> StatusCode {
    match err {
        RecorderError::PermissionDenied => StatusCode::FORBIDDEN,
        RecorderError::AlreadyRecording => StatusCode::CONFLICT,
        RecorderError::NotRecording => StatusCode::NOT_FOUND,
        RecorderError::DeviceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        RecorderError::ArtifactUnreadable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: RecorderError) -> axum::response::Response {
    error!("recorder operation failed: {err}");
    (
        error_status(&err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

fn status_response(result: Result<StatusEvent, RecorderError>) -> axum::response::Response {
    match result {
        Ok(event) => (StatusCode::OK, Json(event)).into_response(),
        Err(err) => error_response(err),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /recorder/permission
/// Request microphone access via the permission gate
pub async fn request_permission(State(state): State<AppState>) -> impl IntoResponse {
    let permission = state.recorder.request_permission();
    info!("microphone permission requested: {:?}", permission);
    (StatusCode::OK, Json(PermissionResponse { state: permission }))
}

/// POST /recorder/start
/// Start the recording session
pub async fn start_recording(State(state): State<AppState>) -> impl IntoResponse {
    status_response(state.recorder.start().await)
}

/// POST /recorder/pause
/// Pause the active session
pub async fn pause_recording(State(state): State<AppState>) -> impl IntoResponse {
    status_response(state.recorder.pause().await)
}

/// POST /recorder/resume
/// Resume the paused session
pub async fn resume_recording(State(state): State<AppState>) -> impl IntoResponse {
    status_response(state.recorder.resume().await)
}

/// POST /recorder/stop
/// Stop the session and return the artifact description
pub async fn stop_recording(State(state): State<AppState>) -> impl IntoResponse {
    match state.recorder.stop().await {
        Ok(artifact) => {
            let artifact = with_web_address(artifact);
            (StatusCode::OK, Json(artifact)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /recorder/status
/// Report the live status
pub async fn current_status(State(state): State<AppState>) -> impl IntoResponse {
    let event = state.recorder.current_status().await;
    (StatusCode::OK, Json(event))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Fill `webAddress` with the `/recordings` mount of the artifact file. The
/// state machine leaves the field empty; deriving it is transport business.
fn with_web_address(mut artifact: ArtifactDescription) -> ArtifactDescription {
    if let Some(file_name) = artifact.location.file_name().and_then(|n| n.to_str()) {
        artifact.web_address = Some(format!("/recordings/{file_name}"));
    }
    artifact
}
