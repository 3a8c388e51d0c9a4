use crate::session::Recorder;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The single recording session state machine.
    pub recorder: Arc<Recorder>,
    /// Directory served under `/recordings`, used to derive artifact web
    /// addresses.
    pub recordings_dir: PathBuf,
}

impl AppState {
    pub fn new(recorder: Arc<Recorder>, recordings_dir: PathBuf) -> Self {
        Self {
            recorder,
            recordings_dir,
        }
    }
}
