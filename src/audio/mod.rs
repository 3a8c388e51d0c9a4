pub mod device;
pub mod encoding;
pub mod probe;
pub mod source;
pub mod store;
pub mod writer;

pub use device::{CaptureDevice, CaptureHandle, CaptureRequestError, DeviceError};
pub use encoding::{AudioContainer, EncodingParams};
pub use probe::{MetadataProbe, ProbeError, SymphoniaProbe};
pub use source::{AudioFrame, FileFrameSource, FrameSource, SilenceFrameSource};
pub use store::{ArtifactStore, StoreError, TempArtifactStore};
pub use writer::PcmWavDevice;
