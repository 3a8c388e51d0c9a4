use anyhow::Result;
use serde::Deserialize;

use crate::audio::{AudioContainer, EncodingParams};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub audio: AudioConfig,
    pub permission: PermissionConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    /// Directory where session artifacts are allocated.
    pub recordings_path: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub bitrate: u32,
    pub container: AudioContainer,
    /// Optional WAV file streamed as the capture input (testing/batch runs).
    /// When absent the device captures silence.
    pub input_wav: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PermissionConfig {
    pub allow_microphone: bool,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl AudioConfig {
    pub fn encoding_params(&self) -> EncodingParams {
        EncodingParams {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bitrate: self.bitrate,
            container: self.container,
        }
    }
}
