use thiserror::Error;

use crate::audio::device::DeviceError;
use crate::audio::probe::ProbeError;

/// Errors surfaced by the recording session state machine.
///
/// Every failure is reported synchronously to the caller of the failing
/// operation; cleanup of the device handle and session slot has already
/// happened by the time one of these is returned.
#[derive(Debug, Error)]
pub enum RecorderError {
    /// Microphone access has not been granted; the capture device was never
    /// touched.
    #[error("microphone permission not granted")]
    PermissionDenied,

    /// A session is already active. The existing session is left untouched;
    /// start requests are rejected, never queued.
    #[error("recording already in progress")]
    AlreadyRecording,

    /// pause/resume/stop was called with no active session.
    #[error("no recording in progress")]
    NotRecording,

    /// The capture device failed to arm, pause, resume, or stop, or the
    /// request timed out at the port boundary.
    #[error("capture device unavailable")]
    DeviceUnavailable(#[source] DeviceError),

    /// The finished artifact could not be probed for a valid duration. The
    /// device has already been released and the session torn down.
    #[error("failed to fetch recording")]
    ArtifactUnreadable(#[source] ProbeError),
}
