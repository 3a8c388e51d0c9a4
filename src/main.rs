use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use mic_session::{
    AppState, Config, ConfigPermissionGate, FileFrameSource, PcmWavDevice, Recorder,
    SilenceFrameSource, SymphoniaProbe, TempArtifactStore,
};

#[derive(Parser, Debug)]
#[command(name = "mic-session", about = "Single-session microphone capture service")]
struct Args {
    /// Path to the configuration file (without extension)
    #[arg(short, long, default_value = "config/mic-session")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} starting", cfg.service.name);
    info!(
        "artifacts: {} ({}Hz, {} channel(s), container {:?})",
        cfg.audio.recordings_path, cfg.audio.sample_rate, cfg.audio.channels, cfg.audio.container
    );

    let store = Arc::new(TempArtifactStore::new(&cfg.audio.recordings_path));
    let gate = Arc::new(ConfigPermissionGate::new(cfg.permission.allow_microphone));
    let probe = Arc::new(SymphoniaProbe);

    let device: Arc<dyn mic_session::CaptureDevice> = match &cfg.audio.input_wav {
        Some(path) => {
            info!("capture input: WAV file {}", path);
            Arc::new(PcmWavDevice::new(FileFrameSource::new(path)))
        }
        None => {
            info!("capture input: silence (no input configured)");
            Arc::new(PcmWavDevice::new(SilenceFrameSource::new()))
        }
    };

    let recorder = Arc::new(Recorder::new(
        gate,
        device,
        probe,
        Arc::clone(&store) as Arc<dyn mic_session::ArtifactStore>,
        cfg.audio.encoding_params(),
    ));

    // Mirror every status transition into the service log.
    recorder.subscribe_status(Arc::new(|event| {
        info!("status: {:?}", event.status);
    }));

    let state = AppState::new(recorder, store.dir().to_path_buf());
    let router = mic_session::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {addr}");

    axum::serve(listener, router).await?;

    Ok(())
}
