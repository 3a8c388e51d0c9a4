use serde::{Deserialize, Serialize};

/// Container/codec pairing for the produced artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AudioContainer {
    /// AAC audio in an MPEG-4 container (`.m4a`). Broadly playable and small.
    AacMpeg4,
    /// Uncompressed 16-bit PCM in a WAV container (`.wav`).
    Wav,
}

impl AudioContainer {
    /// File extension including the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            AudioContainer::AacMpeg4 => ".m4a",
            AudioContainer::Wav => ".wav",
        }
    }

    /// MIME type reported in the artifact description.
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioContainer::AacMpeg4 => "audio/aac",
            AudioContainer::Wav => "audio/wav",
        }
    }
}

/// Encoding parameters handed to the capture device at arm time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingParams {
    /// Number of channels (1 = mono).
    pub channels: u16,
    /// Sampling rate in Hz.
    pub sample_rate: u32,
    /// Encoder bitrate in bits per second. Ignored by uncompressed containers.
    pub bitrate: u32,
    /// Target container/codec.
    pub container: AudioContainer,
}

impl Default for EncodingParams {
    fn default() -> Self {
        // Mono 44.1 kHz AAC at 96 kbps: broad device compatibility with
        // small artifacts.
        Self {
            channels: 1,
            sample_rate: 44_100,
            bitrate: 96_000,
            container: AudioContainer::AacMpeg4,
        }
    }
}
