use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use zipformer_asr_api::application::services::{TranscriptionService, WorkerPool};
use zipformer_asr_api::infrastructure::audio::{FfmpegAudioDecoder, UploadAudioDecoder};
use zipformer_asr_api::infrastructure::observability::init_tracing;
use zipformer_asr_api::infrastructure::recognizer::{GatewayCell, RecognizerGateway};
use zipformer_asr_api::presentation::{AppState, Settings, create_router};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(settings.application.workers.max(1))
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(run(settings))
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    init_tracing(&settings.tracing_config(), settings.application.port);
    tracing::info!(app = %settings.application.name, "Application startup");

    let api_keys = Arc::new(settings.api_key_registry()?);
    if api_keys.is_enabled() {
        tracing::info!(keys = api_keys.len(), "API key authentication enabled");
    } else {
        tracing::warn!("No API keys configured, authentication disabled");
    }

    let ffmpeg = FfmpegAudioDecoder::new(&settings.audio.ffmpeg_binary);
    match ffmpeg.check_binary() {
        Ok(version) => tracing::info!(version = %version, "ffmpeg available"),
        Err(e) => tracing::warn!(
            error = %e,
            "Compressed uploads will fail until ffmpeg is installed"
        ),
    }
    let decoder = Arc::new(UploadAudioDecoder::new(
        settings.audio.max_upload_bytes,
        ffmpeg,
    ));

    // The model must be fully built before the listener is bound.
    let recognizer_config = settings.recognizer_config();
    let cell = Arc::new(GatewayCell::new());
    let gateway = {
        let cell = Arc::clone(&cell);
        tokio::task::spawn_blocking(move || {
            cell.get_or_try_init(|| RecognizerGateway::load(&recognizer_config))
        })
        .await
        .context("recognizer initialization task failed")?
        .context("failed to initialize recognizer")?
    };

    let pool = WorkerPool::new(settings.audio.blocking_workers, settings.job_timeout());
    tracing::info!(
        blocking_workers = pool.size(),
        job_timeout = ?settings.job_timeout(),
        "Worker pool ready"
    );

    let transcription_service = Arc::new(TranscriptionService::new(decoder, gateway, pool));

    let state = AppState {
        transcription_service,
        api_keys,
        max_upload_bytes: settings.audio.max_upload_bytes,
    };

    let router = create_router(state);

    let addr = (settings.application.host.as_str(), settings.application.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| {
            format!(
                "failed to bind {}:{}",
                settings.application.host, settings.application.port
            )
        })?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Application shutdown, cleaning up resources");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
