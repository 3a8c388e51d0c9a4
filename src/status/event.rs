use serde::{Deserialize, Serialize};

/// The status vocabulary reported to callers and listeners.
///
/// Wire form is camelCase, e.g. `"recordingStarted"`. Lifecycle kinds report
/// the transition that just happened; failure kinds report why an attempted
/// transition was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    /// No session exists (initial and terminal state).
    NoRecordingInProgress,
    /// A session was just armed.
    RecordingStarted,
    /// A session is armed and capturing.
    RecordingInProgress,
    /// The active session is paused.
    RecordingPaused,
    /// The active session just resumed capturing.
    RecordingResumed,
    /// start was rejected because microphone access is not granted.
    MicrophonePermissionNotGranted,
    /// start was rejected because a session is already active.
    MicrophoneIsBusy,
    /// The capture device failed to arm or service a request.
    RecordingFailed,
    /// stop released the device but the artifact could not be read.
    FailedToFetchRecording,
}

/// A single status emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    pub status: StatusKind,
}

impl StatusEvent {
    pub fn new(status: StatusKind) -> Self {
        Self { status }
    }
}
