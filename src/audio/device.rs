use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::encoding::EncodingParams;
use super::store::StoreError;

/// Errors raised by a capture device implementation.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("capture device is busy")]
    Busy,

    #[error("capture device did not respond within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("capture device I/O failed")]
    Io(#[from] std::io::Error),

    #[error("audio encoding failed")]
    Encode(#[from] hound::Error),

    #[error("capture backend error: {0}")]
    Backend(String),
}

/// Failure modes for pause/resume requests on an armed device.
///
/// Capability gaps are reported as `Unsupported` rather than branching on
/// platform versions, so the state machine stays platform-agnostic.
#[derive(Debug, Error)]
pub enum CaptureRequestError {
    #[error("operation not supported by this capture device")]
    Unsupported,

    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// Port to the platform's audio-capture primitive.
///
/// Implementations own no policy: they arm the hardware against an output
/// location chosen by the caller and hand back a [`CaptureHandle`].
#[async_trait::async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Prepare and start capturing into `output` with the given parameters.
    ///
    /// On failure the device must be left unarmed; there is no half-armed
    /// state to clean up from the caller's side.
    async fn arm(
        &self,
        output: &Path,
        params: &EncodingParams,
    ) -> Result<Box<dyn CaptureHandle>, DeviceError>;

    /// Device name for logging.
    fn name(&self) -> &str;
}

/// An armed capture in progress.
///
/// `stop` consumes the handle, so a capture can never be stopped twice; it
/// must release the hardware even if an earlier request partially failed.
#[async_trait::async_trait]
pub trait CaptureHandle: Send {
    async fn pause(&mut self) -> Result<(), CaptureRequestError>;

    async fn resume(&mut self) -> Result<(), CaptureRequestError>;

    async fn stop(self: Box<Self>) -> Result<(), DeviceError>;
}
