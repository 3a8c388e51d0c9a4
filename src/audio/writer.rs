use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::device::{CaptureDevice, CaptureHandle, CaptureRequestError, DeviceError};
use super::encoding::EncodingParams;
use super::source::{AudioFrame, FrameSource};

/// Capture device that drains a [`FrameSource`] into a single WAV artifact.
///
/// The in-process counterpart to a platform recorder: arm spawns a writer
/// task, pause gates frames without stopping the source, stop finalizes the
/// WAV header so the artifact is readable by the metadata probe.
pub struct PcmWavDevice<S: FrameSource> {
    source: S,
}

impl<S: FrameSource> PcmWavDevice<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait::async_trait]
impl<S: FrameSource> CaptureDevice for PcmWavDevice<S> {
    async fn arm(
        &self,
        output: &Path,
        params: &EncodingParams,
    ) -> Result<Box<dyn CaptureHandle>, DeviceError> {
        let mut frames = self.source.open(params).await?;

        let spec = hound::WavSpec {
            channels: params.channels,
            sample_rate: params.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(output, spec)?;

        let paused = Arc::new(AtomicBool::new(false));
        let gate = Arc::clone(&paused);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    frame = frames.recv() => match frame {
                        None => break,
                        Some(frame) => {
                            if gate.load(Ordering::SeqCst) {
                                continue;
                            }
                            for &sample in &frame.samples {
                                writer.write_sample(sample)?;
                            }
                        }
                    }
                }
            }

            writer.finalize()?;
            Ok::<(), hound::Error>(())
        });

        info!(
            "armed {} capture into {} ({}Hz, {} channel(s))",
            self.source.name(),
            output.display(),
            params.sample_rate,
            params.channels
        );

        Ok(Box::new(WavCaptureHandle {
            paused,
            supports_pause: self.source.supports_pause(),
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }))
    }

    fn name(&self) -> &str {
        "pcm-wav"
    }
}

struct WavCaptureHandle {
    paused: Arc<AtomicBool>,
    supports_pause: bool,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), hound::Error>>>,
}

#[async_trait::async_trait]
impl CaptureHandle for WavCaptureHandle {
    async fn pause(&mut self) -> Result<(), CaptureRequestError> {
        if !self.supports_pause {
            return Err(CaptureRequestError::Unsupported);
        }
        self.paused.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn resume(&mut self) -> Result<(), CaptureRequestError> {
        if !self.supports_pause {
            return Err(CaptureRequestError::Unsupported);
        }
        self.paused.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(mut self: Box<Self>) -> Result<(), DeviceError> {
        if let Some(shutdown) = self.shutdown.take() {
            // The writer task may already have ended (source exhausted).
            let _ = shutdown.send(());
        }

        match self.task.take() {
            Some(task) => match task.await {
                Ok(result) => Ok(result?),
                Err(join_err) => Err(DeviceError::Backend(format!(
                    "capture task failed: {join_err}"
                ))),
            },
            None => Ok(()),
        }
    }
}

impl Drop for WavCaptureHandle {
    fn drop(&mut self) {
        // A dropped (never-stopped) handle still winds down the writer task so
        // the partial file gets a valid header.
        if let Some(shutdown) = self.shutdown.take() {
            if shutdown.send(()).is_err() {
                warn!("capture writer task ended before shutdown");
            }
        }
    }
}
