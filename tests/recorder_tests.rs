// Integration tests for the recording session state machine
//
// These tests drive the Recorder through its lifecycle with fake port
// implementations and verify transition rules, cleanup guarantees, and
// status emissions.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use mic_session::{
    CaptureDevice, CaptureHandle, CaptureRequestError, DeviceError, EncodingParams, MetadataProbe,
    PermissionGate, PermissionState, ProbeError, Recorder, RecorderError, StatusKind,
    TempArtifactStore,
};

// ============================================================================
// Fake ports
// ============================================================================

struct FakeGate {
    allow: bool,
}

impl PermissionGate for FakeGate {
    fn current(&self) -> PermissionState {
        if self.allow {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }
}

struct FakeProbe {
    duration_millis: Option<u64>,
}

impl MetadataProbe for FakeProbe {
    fn probe(&self, _location: &Path) -> Result<u64, ProbeError> {
        self.duration_millis.ok_or(ProbeError::UnknownDuration)
    }
}

#[derive(Default)]
struct FakeDevice {
    fail_arm: bool,
    supports_pause: bool,
    arm_calls: Arc<Mutex<Vec<PathBuf>>>,
    released: Arc<AtomicBool>,
}

impl FakeDevice {
    fn new() -> Self {
        Self {
            supports_pause: true,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl CaptureDevice for FakeDevice {
    async fn arm(
        &self,
        output: &Path,
        _params: &EncodingParams,
    ) -> Result<Box<dyn CaptureHandle>, DeviceError> {
        if self.fail_arm {
            return Err(DeviceError::Busy);
        }
        self.arm_calls.lock().unwrap().push(output.to_path_buf());
        self.released.store(false, Ordering::SeqCst);
        Ok(Box::new(FakeHandle {
            supports_pause: self.supports_pause,
            released: Arc::clone(&self.released),
        }))
    }

    fn name(&self) -> &str {
        "fake"
    }
}

struct FakeHandle {
    supports_pause: bool,
    released: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl CaptureHandle for FakeHandle {
    async fn pause(&mut self) -> Result<(), CaptureRequestError> {
        if !self.supports_pause {
            return Err(CaptureRequestError::Unsupported);
        }
        Ok(())
    }

    async fn resume(&mut self) -> Result<(), CaptureRequestError> {
        if !self.supports_pause {
            return Err(CaptureRequestError::Unsupported);
        }
        Ok(())
    }

    async fn stop(self: Box<Self>) -> Result<(), DeviceError> {
        self.released.store(true, Ordering::SeqCst);
        Ok(())
    }
}

struct Fixture {
    recorder: Arc<Recorder>,
    arm_calls: Arc<Mutex<Vec<PathBuf>>>,
    released: Arc<AtomicBool>,
    _dir: TempDir,
}

fn fixture(allow: bool, device: FakeDevice, probe: FakeProbe) -> Fixture {
    let dir = TempDir::new().unwrap();
    let arm_calls = Arc::clone(&device.arm_calls);
    let released = Arc::clone(&device.released);
    let recorder = Arc::new(Recorder::new(
        Arc::new(FakeGate { allow }),
        Arc::new(device),
        Arc::new(probe),
        Arc::new(TempArtifactStore::new(dir.path())),
        EncodingParams::default(),
    ));
    Fixture {
        recorder,
        arm_calls,
        released,
        _dir: dir,
    }
}

fn ok_probe() -> FakeProbe {
    FakeProbe {
        duration_millis: Some(1234),
    }
}

// ============================================================================
// Lifecycle scenarios
// ============================================================================

#[tokio::test]
async fn test_full_lifecycle_scenario() {
    let f = fixture(true, FakeDevice::new(), ok_probe());

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    f.recorder
        .subscribe_status(Arc::new(move |event| sink.lock().unwrap().push(event.status)));

    assert_eq!(
        f.recorder.start().await.unwrap().status,
        StatusKind::RecordingStarted
    );
    assert_eq!(
        f.recorder.current_status().await.status,
        StatusKind::RecordingInProgress
    );
    assert_eq!(
        f.recorder.pause().await.unwrap().status,
        StatusKind::RecordingPaused
    );
    assert_eq!(
        f.recorder.resume().await.unwrap().status,
        StatusKind::RecordingResumed
    );

    let artifact = f.recorder.stop().await.unwrap();
    assert_eq!(artifact.file_extension, ".m4a");
    assert_eq!(artifact.mime_type, "audio/aac");
    assert_eq!(artifact.duration_millis, Some(1234));
    assert!(artifact.web_address.is_none(), "transport fills webAddress");

    // Exactly one emission per operation, in order.
    assert_eq!(
        *events.lock().unwrap(),
        vec![
            StatusKind::RecordingStarted,
            StatusKind::RecordingInProgress,
            StatusKind::RecordingPaused,
            StatusKind::RecordingResumed,
            StatusKind::NoRecordingInProgress,
        ]
    );
}

#[tokio::test]
async fn test_double_start_is_rejected_not_queued() {
    let f = fixture(true, FakeDevice::new(), ok_probe());

    f.recorder.start().await.unwrap();
    let err = f.recorder.start().await.unwrap_err();
    assert!(matches!(err, RecorderError::AlreadyRecording));

    // First session is untouched and still armed.
    assert_eq!(
        f.recorder.current_status().await.status,
        StatusKind::RecordingInProgress
    );
    assert_eq!(f.arm_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_permission_denied_never_touches_device() {
    let f = fixture(false, FakeDevice::new(), ok_probe());

    let err = f.recorder.start().await.unwrap_err();
    assert!(matches!(err, RecorderError::PermissionDenied));
    assert!(f.arm_calls.lock().unwrap().is_empty(), "device port invoked");
    assert_eq!(
        f.recorder.current_status().await.status,
        StatusKind::NoRecordingInProgress
    );
}

#[tokio::test]
async fn test_operations_while_idle_yield_not_recording() {
    let f = fixture(true, FakeDevice::new(), ok_probe());

    assert!(matches!(
        f.recorder.pause().await.unwrap_err(),
        RecorderError::NotRecording
    ));
    assert!(matches!(
        f.recorder.resume().await.unwrap_err(),
        RecorderError::NotRecording
    ));
    assert!(matches!(
        f.recorder.stop().await.unwrap_err(),
        RecorderError::NotRecording
    ));
    assert_eq!(
        f.recorder.current_status().await.status,
        StatusKind::NoRecordingInProgress
    );
}

#[tokio::test]
async fn test_pause_resume_keeps_output_location() {
    let f = fixture(true, FakeDevice::new(), ok_probe());

    f.recorder.start().await.unwrap();
    let armed_at = f.arm_calls.lock().unwrap()[0].clone();

    f.recorder.pause().await.unwrap();
    f.recorder.resume().await.unwrap();

    let artifact = f.recorder.stop().await.unwrap();
    assert_eq!(artifact.location, armed_at);
}

#[tokio::test]
async fn test_duplicate_stop_fails_with_not_recording() {
    let f = fixture(true, FakeDevice::new(), ok_probe());

    f.recorder.start().await.unwrap();
    f.recorder.stop().await.unwrap();

    assert!(matches!(
        f.recorder.stop().await.unwrap_err(),
        RecorderError::NotRecording
    ));
}

// ============================================================================
// Degradation and failure cleanup
// ============================================================================

#[tokio::test]
async fn test_unsupported_pause_is_truthful_noop() {
    let device = FakeDevice {
        supports_pause: false,
        ..FakeDevice::new()
    };
    let f = fixture(true, device, ok_probe());

    f.recorder.start().await.unwrap();

    // The call succeeds but reports the unchanged state.
    let event = f.recorder.pause().await.unwrap();
    assert_eq!(event.status, StatusKind::RecordingInProgress);
    assert_eq!(
        f.recorder.current_status().await.status,
        StatusKind::RecordingInProgress
    );
}

#[tokio::test]
async fn test_arm_failure_leaves_machine_idle() {
    let device = FakeDevice {
        fail_arm: true,
        ..FakeDevice::new()
    };
    let f = fixture(true, device, ok_probe());

    let err = f.recorder.start().await.unwrap_err();
    assert!(matches!(err, RecorderError::DeviceUnavailable(_)));
    assert_eq!(
        f.recorder.current_status().await.status,
        StatusKind::NoRecordingInProgress
    );
}

#[tokio::test]
async fn test_probe_failure_still_releases_device() {
    let f = fixture(
        true,
        FakeDevice::new(),
        FakeProbe {
            duration_millis: None,
        },
    );

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    f.recorder
        .subscribe_status(Arc::new(move |event| sink.lock().unwrap().push(event.status)));

    f.recorder.start().await.unwrap();
    let err = f.recorder.stop().await.unwrap_err();
    assert!(matches!(err, RecorderError::ArtifactUnreadable(_)));

    // Device handle was released before the probe ran.
    assert!(f.released.load(Ordering::SeqCst));
    assert!(events
        .lock()
        .unwrap()
        .contains(&StatusKind::FailedToFetchRecording));

    // No resource leak: a fresh start succeeds.
    assert_eq!(
        f.recorder.start().await.unwrap().status,
        StatusKind::RecordingStarted
    );
}

#[tokio::test]
async fn test_locations_are_never_reused_across_sessions() {
    let f = fixture(true, FakeDevice::new(), ok_probe());

    f.recorder.start().await.unwrap();
    let first = f.recorder.stop().await.unwrap();
    f.recorder.start().await.unwrap();
    let second = f.recorder.stop().await.unwrap();

    assert_ne!(first.location, second.location);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_starts_produce_exactly_one_session() {
    let f = fixture(true, FakeDevice::new(), ok_probe());
    let successes = Arc::new(AtomicUsize::new(0));
    let conflicts = Arc::new(AtomicUsize::new(0));

    let mut tasks = Vec::new();
    for _ in 0..8 {
        let recorder = Arc::clone(&f.recorder);
        let successes = Arc::clone(&successes);
        let conflicts = Arc::clone(&conflicts);
        tasks.push(tokio::spawn(async move {
            match recorder.start().await {
                Ok(_) => successes.fetch_add(1, Ordering::SeqCst),
                Err(RecorderError::AlreadyRecording) => conflicts.fetch_add(1, Ordering::SeqCst),
                Err(other) => panic!("unexpected error: {other}"),
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(successes.load(Ordering::SeqCst), 1);
    assert_eq!(conflicts.load(Ordering::SeqCst), 7);
    assert_eq!(f.arm_calls.lock().unwrap().len(), 1);
}
