pub mod audio;
pub mod config;
pub mod error;
pub mod http;
pub mod permission;
pub mod session;
pub mod status;

pub use audio::{
    ArtifactStore, AudioContainer, AudioFrame, CaptureDevice, CaptureHandle, CaptureRequestError,
    DeviceError, EncodingParams, FileFrameSource, FrameSource, MetadataProbe, PcmWavDevice,
    ProbeError, SilenceFrameSource, StoreError, SymphoniaProbe, TempArtifactStore,
};
pub use config::Config;
pub use error::RecorderError;
pub use http::{create_router, AppState};
pub use permission::{ConfigPermissionGate, PermissionGate, PermissionState};
pub use session::{ArtifactDescription, CaptureState, Recorder};
pub use status::{StatusEmitter, StatusEvent, StatusKind, StatusListener, SubscriptionHandle};
