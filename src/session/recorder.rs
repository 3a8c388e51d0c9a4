use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{info, warn};

use super::artifact::ArtifactDescription;
use crate::audio::{
    ArtifactStore, CaptureDevice, CaptureHandle, CaptureRequestError, DeviceError, EncodingParams,
    MetadataProbe,
};
use crate::error::RecorderError;
use crate::permission::{PermissionGate, PermissionState};
use crate::status::{StatusEmitter, StatusEvent, StatusKind, StatusListener, SubscriptionHandle};

const DEFAULT_DEVICE_TIMEOUT: Duration = Duration::from_secs(5);

/// Lifecycle state of the active session. No session exists while idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Armed,
    Paused,
}

struct ActiveSession {
    state: CaptureState,
    handle: Box<dyn CaptureHandle>,
    output: PathBuf,
    started_at: DateTime<Utc>,
}

/// The recording session state machine.
///
/// Owns at most one session process-wide. All mutating operations serialize
/// behind the session mutex, so the state field and the device handle update
/// together or not at all. Every operation emits exactly one status event
/// reflecting the resulting status, success or failure.
pub struct Recorder {
    gate: Arc<dyn PermissionGate>,
    device: Arc<dyn CaptureDevice>,
    probe: Arc<dyn MetadataProbe>,
    store: Arc<dyn ArtifactStore>,
    params: EncodingParams,
    device_timeout: Duration,
    emitter: StatusEmitter,
    session: Mutex<Option<ActiveSession>>,
}

impl Recorder {
    pub fn new(
        gate: Arc<dyn PermissionGate>,
        device: Arc<dyn CaptureDevice>,
        probe: Arc<dyn MetadataProbe>,
        store: Arc<dyn ArtifactStore>,
        params: EncodingParams,
    ) -> Self {
        Self {
            gate,
            device,
            probe,
            store,
            params,
            device_timeout: DEFAULT_DEVICE_TIMEOUT,
            emitter: StatusEmitter::new(),
            session: Mutex::new(None),
        }
    }

    /// Bound on how long a single device call may block before it is
    /// reported as unavailable.
    pub fn with_device_timeout(mut self, device_timeout: Duration) -> Self {
        self.device_timeout = device_timeout;
        self
    }

    pub fn encoding_params(&self) -> &EncodingParams {
        &self.params
    }

    /// Delegate a permission request to the gate.
    pub fn request_permission(&self) -> PermissionState {
        self.gate.request()
    }

    /// Arm the capture device and transition Idle -> Armed.
    ///
    /// Fails without touching the device when permission is missing, and
    /// without touching the existing session when one is already active. Any
    /// arming failure discards the half-built session and its allocated file.
    pub async fn start(&self) -> Result<StatusEvent, RecorderError> {
        let mut slot = self.session.lock().await;

        if self.gate.current() != PermissionState::Granted {
            self.emitter.emit(StatusKind::MicrophonePermissionNotGranted);
            return Err(RecorderError::PermissionDenied);
        }

        if slot.is_some() {
            self.emitter.emit(StatusKind::MicrophoneIsBusy);
            return Err(RecorderError::AlreadyRecording);
        }

        let output = match self.store.allocate(self.params.container.extension()) {
            Ok(location) => location,
            Err(err) => {
                self.emitter.emit(StatusKind::RecordingFailed);
                return Err(RecorderError::DeviceUnavailable(err.into()));
            }
        };

        let handle = match timeout(self.device_timeout, self.device.arm(&output, &self.params)).await
        {
            Ok(Ok(handle)) => handle,
            Ok(Err(err)) => {
                discard_allocation(&output);
                self.emitter.emit(StatusKind::RecordingFailed);
                return Err(RecorderError::DeviceUnavailable(err));
            }
            Err(_) => {
                discard_allocation(&output);
                self.emitter.emit(StatusKind::RecordingFailed);
                return Err(RecorderError::DeviceUnavailable(DeviceError::Timeout(
                    self.device_timeout,
                )));
            }
        };

        info!(
            "recording started on {} -> {}",
            self.device.name(),
            output.display()
        );

        *slot = Some(ActiveSession {
            state: CaptureState::Armed,
            handle,
            output,
            started_at: Utc::now(),
        });

        Ok(self.emitter.emit(StatusKind::RecordingStarted))
    }

    /// Transition Armed -> Paused.
    ///
    /// A device that does not support pausing yields a truthful no-op: the
    /// state is unchanged and the reported status says so. Pausing an already
    /// paused session is idempotent.
    pub async fn pause(&self) -> Result<StatusEvent, RecorderError> {
        let mut slot = self.session.lock().await;

        let Some(session) = slot.as_mut() else {
            self.emitter.emit(StatusKind::NoRecordingInProgress);
            return Err(RecorderError::NotRecording);
        };

        if session.state == CaptureState::Paused {
            return Ok(self.emitter.emit(StatusKind::RecordingPaused));
        }

        match timeout(self.device_timeout, session.handle.pause()).await {
            Ok(Ok(())) => {
                session.state = CaptureState::Paused;
                Ok(self.emitter.emit(StatusKind::RecordingPaused))
            }
            Ok(Err(CaptureRequestError::Unsupported)) => {
                info!("pause not supported by capture device; state unchanged");
                Ok(self.emitter.emit(StatusKind::RecordingInProgress))
            }
            Ok(Err(CaptureRequestError::Device(err))) => {
                self.emitter.emit(StatusKind::RecordingFailed);
                Err(RecorderError::DeviceUnavailable(err))
            }
            Err(_) => {
                self.emitter.emit(StatusKind::RecordingFailed);
                Err(RecorderError::DeviceUnavailable(DeviceError::Timeout(
                    self.device_timeout,
                )))
            }
        }
    }

    /// Transition Paused -> Armed. Symmetric to [`Recorder::pause`].
    pub async fn resume(&self) -> Result<StatusEvent, RecorderError> {
        let mut slot = self.session.lock().await;

        let Some(session) = slot.as_mut() else {
            self.emitter.emit(StatusKind::NoRecordingInProgress);
            return Err(RecorderError::NotRecording);
        };

        if session.state == CaptureState::Armed {
            return Ok(self.emitter.emit(StatusKind::RecordingInProgress));
        }

        match timeout(self.device_timeout, session.handle.resume()).await {
            Ok(Ok(())) => {
                session.state = CaptureState::Armed;
                Ok(self.emitter.emit(StatusKind::RecordingResumed))
            }
            Ok(Err(CaptureRequestError::Unsupported)) => {
                info!("resume not supported by capture device; state unchanged");
                Ok(self.emitter.emit(StatusKind::RecordingPaused))
            }
            Ok(Err(CaptureRequestError::Device(err))) => {
                self.emitter.emit(StatusKind::RecordingFailed);
                Err(RecorderError::DeviceUnavailable(err))
            }
            Err(_) => {
                self.emitter.emit(StatusKind::RecordingFailed);
                Err(RecorderError::DeviceUnavailable(DeviceError::Timeout(
                    self.device_timeout,
                )))
            }
        }
    }

    /// Stop the capture, probe the artifact, and transition back to Idle.
    ///
    /// The device handle is released before any metadata work, so a probe
    /// failure never leaks the hardware. The session is torn down on every
    /// path; only the reported result differs.
    pub async fn stop(&self) -> Result<ArtifactDescription, RecorderError> {
        let mut slot = self.session.lock().await;

        let Some(session) = slot.take() else {
            self.emitter.emit(StatusKind::NoRecordingInProgress);
            return Err(RecorderError::NotRecording);
        };

        let ActiveSession {
            handle,
            output,
            started_at,
            ..
        } = session;

        // The session slot is already empty: whatever happens below, the
        // machine is Idle and a later start must succeed.
        match timeout(self.device_timeout, handle.stop()).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                self.emitter.emit(StatusKind::RecordingFailed);
                return Err(RecorderError::DeviceUnavailable(err));
            }
            Err(_) => {
                self.emitter.emit(StatusKind::RecordingFailed);
                return Err(RecorderError::DeviceUnavailable(DeviceError::Timeout(
                    self.device_timeout,
                )));
            }
        }

        let duration_millis = match self.probe.probe(&output) {
            Ok(millis) => millis,
            Err(err) => {
                self.emitter.emit(StatusKind::FailedToFetchRecording);
                return Err(RecorderError::ArtifactUnreadable(err));
            }
        };

        info!(
            "recording stopped: {} ({} ms, started {})",
            output.display(),
            duration_millis,
            started_at
        );

        let artifact = ArtifactDescription {
            location: output,
            web_address: None,
            duration_millis: Some(duration_millis),
            file_extension: self.params.container.extension().to_string(),
            mime_type: self.params.container.mime_type().to_string(),
        };

        self.emitter.emit(StatusKind::NoRecordingInProgress);
        Ok(artifact)
    }

    /// Report the live state. Always succeeds; the report is also emitted to
    /// listeners so status queries double as heartbeats.
    pub async fn current_status(&self) -> StatusEvent {
        let slot = self.session.lock().await;

        let kind = match slot.as_ref().map(|s| s.state) {
            None => StatusKind::NoRecordingInProgress,
            Some(CaptureState::Armed) => StatusKind::RecordingInProgress,
            Some(CaptureState::Paused) => StatusKind::RecordingPaused,
        };

        self.emitter.emit(kind)
    }

    pub fn subscribe_status(&self, listener: StatusListener) -> SubscriptionHandle {
        self.emitter.subscribe(listener)
    }

    pub fn unsubscribe_status(&self, handle: SubscriptionHandle) {
        self.emitter.unsubscribe(handle)
    }
}

/// Best-effort removal of a location allocated for a session that never
/// armed. The allocator only reserves a path, but the device may have created
/// the file before failing.
fn discard_allocation(output: &Path) {
    match std::fs::remove_file(output) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            "failed to remove discarded artifact {}: {}",
            output.display(),
            err
        ),
    }
}
