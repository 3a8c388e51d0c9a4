use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::device::DeviceError;
use super::encoding::EncodingParams;

/// Audio sample data (16-bit PCM, interleaved).
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved).
    pub samples: Vec<i16>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels.
    pub channels: u16,
    /// Timestamp in milliseconds since capture started.
    pub timestamp_ms: u64,
}

/// Produces the PCM frame stream consumed by [`super::PcmWavDevice`].
///
/// A fresh receiver is opened per capture session; the stream ends when the
/// receiver is dropped or the source runs out of input.
#[async_trait::async_trait]
pub trait FrameSource: Send + Sync {
    async fn open(&self, params: &EncodingParams) -> Result<mpsc::Receiver<AudioFrame>, DeviceError>;

    /// Whether captures from this source can be paused mid-stream.
    fn supports_pause(&self) -> bool {
        true
    }

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Emits zeroed frames at a steady rate until the capture ends.
///
/// Stands in for a live input on machines without one (loopback testing,
/// demo deployments).
pub struct SilenceFrameSource {
    frame_duration: Duration,
}

impl SilenceFrameSource {
    pub fn new() -> Self {
        Self {
            frame_duration: Duration::from_millis(100),
        }
    }
}

impl Default for SilenceFrameSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FrameSource for SilenceFrameSource {
    async fn open(&self, params: &EncodingParams) -> Result<mpsc::Receiver<AudioFrame>, DeviceError> {
        let (tx, rx) = mpsc::channel(16);
        let frame_ms = self.frame_duration.as_millis() as u64;
        let samples_per_frame =
            (params.sample_rate as u64 * frame_ms / 1000) as usize * params.channels as usize;
        let sample_rate = params.sample_rate;
        let channels = params.channels;
        let frame_duration = self.frame_duration;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(frame_duration);
            let mut elapsed_ms = 0u64;

            loop {
                ticker.tick().await;
                let frame = AudioFrame {
                    samples: vec![0i16; samples_per_frame],
                    sample_rate,
                    channels,
                    timestamp_ms: elapsed_ms,
                };
                if tx.send(frame).await.is_err() {
                    // Receiver dropped: capture stopped.
                    break;
                }
                elapsed_ms += frame_ms;
            }
        });

        Ok(rx)
    }

    fn name(&self) -> &str {
        "silence"
    }
}

/// Streams an existing WAV file as timed frames, for testing and batch runs.
pub struct FileFrameSource {
    path: PathBuf,
}

impl FileFrameSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl FrameSource for FileFrameSource {
    async fn open(&self, _params: &EncodingParams) -> Result<mpsc::Receiver<AudioFrame>, DeviceError> {
        let reader = hound::WavReader::open(&self.path)?;
        let spec = reader.spec();
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Streaming input file {} ({}Hz, {} channels, {} samples)",
            self.path.display(),
            spec.sample_rate,
            spec.channels,
            samples.len()
        );

        let (tx, rx) = mpsc::channel(16);
        let frame_ms = 100u64;
        let samples_per_frame =
            (spec.sample_rate as u64 * frame_ms / 1000) as usize * spec.channels as usize;

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(frame_ms));
            let mut elapsed_ms = 0u64;

            for chunk in samples.chunks(samples_per_frame.max(1)) {
                ticker.tick().await;
                let frame = AudioFrame {
                    samples: chunk.to_vec(),
                    sample_rate: spec.sample_rate,
                    channels: spec.channels,
                    timestamp_ms: elapsed_ms,
                };
                if tx.send(frame).await.is_err() {
                    // Receiver dropped: capture stopped.
                    return;
                }
                elapsed_ms += frame_ms;
            }

            warn!("input file exhausted before capture stopped");
        });

        Ok(rx)
    }

    fn name(&self) -> &str {
        "wav-file"
    }
}
