//! HTTP control surface for external callers (plugin bridge, scripts)
//!
//! This module maps the recorder operations onto a REST API:
//! - POST /recorder/permission - Request microphone access
//! - POST /recorder/start - Start the recording session
//! - POST /recorder/pause - Pause the active session
//! - POST /recorder/resume - Resume the paused session
//! - POST /recorder/stop - Stop and return the artifact description
//! - GET /recorder/status - Query the live status
//! - GET /recordings/<file> - Fetch a finished artifact
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
