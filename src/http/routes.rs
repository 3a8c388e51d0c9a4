use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    let recordings = ServeDir::new(&state.recordings_dir);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Permission gate
        .route("/recorder/permission", post(handlers::request_permission))
        // Session control
        .route("/recorder/start", post(handlers::start_recording))
        .route("/recorder/pause", post(handlers::pause_recording))
        .route("/recorder/resume", post(handlers::resume_recording))
        .route("/recorder/stop", post(handlers::stop_recording))
        // Status query (doubles as a listener heartbeat)
        .route("/recorder/status", get(handlers::current_status))
        // Finished artifacts, resolvable via ArtifactDescription.webAddress
        .nest_service("/recordings", recordings)
        // Webview/plugin callers arrive cross-origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
