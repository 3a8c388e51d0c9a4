use std::fs::File;
use std::path::{Path, PathBuf};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use thiserror::Error;
use tracing::debug;

/// Errors raised while probing a finished artifact.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to open artifact {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unrecognized audio format")]
    Format(#[from] symphonia::core::errors::Error),

    #[error("artifact duration could not be determined")]
    UnknownDuration,
}

/// Read-only inspection of a finished artifact.
///
/// Implementations must not mutate or delete the artifact.
pub trait MetadataProbe: Send + Sync {
    /// Duration of the artifact at `location`, in milliseconds.
    fn probe(&self, location: &Path) -> Result<u64, ProbeError>;
}

/// Duration probe backed by symphonia's container/codec detection.
///
/// Covers the M4A artifacts produced by platform recorders as well as the WAV
/// output of [`super::PcmWavDevice`].
pub struct SymphoniaProbe;

impl MetadataProbe for SymphoniaProbe {
    fn probe(&self, location: &Path) -> Result<u64, ProbeError> {
        let file = File::open(location).map_err(|source| ProbeError::Open {
            path: location.to_path_buf(),
            source,
        })?;

        let stream = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = location.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe().format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;

        let track = probed
            .format
            .default_track()
            .ok_or(ProbeError::UnknownDuration)?;
        let params = &track.codec_params;

        let (n_frames, sample_rate) = match (params.n_frames, params.sample_rate) {
            (Some(n), Some(rate)) if rate > 0 => (n, rate),
            _ => return Err(ProbeError::UnknownDuration),
        };

        let duration_millis = n_frames * 1000 / sample_rate as u64;
        debug!(
            "probed {}: {} frames @ {}Hz = {}ms",
            location.display(),
            n_frames,
            sample_rate,
            duration_millis
        );

        Ok(duration_millis)
    }
}
