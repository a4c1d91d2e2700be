use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{AudioDecoder, AudioDecoderError, Transcriber, TranscriberError};
use crate::domain::UploadedAudio;

use super::worker_pool::{WorkerPool, WorkerPoolError};

/// Decodes an upload and runs it through the shared transcriber.
///
/// Both steps block, so each one is dispatched to the worker pool and the
/// request task only awaits the result.
pub struct TranscriptionService {
    decoder: Arc<dyn AudioDecoder>,
    transcriber: Arc<dyn Transcriber>,
    pool: WorkerPool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error(transparent)]
    Decoding(#[from] AudioDecoderError),
    #[error(transparent)]
    Transcription(#[from] TranscriberError),
    #[error("worker pool: {0}")]
    Worker(#[from] WorkerPoolError),
}

impl TranscriptionService {
    pub fn new(
        decoder: Arc<dyn AudioDecoder>,
        transcriber: Arc<dyn Transcriber>,
        pool: WorkerPool,
    ) -> Self {
        Self {
            decoder,
            transcriber,
            pool,
        }
    }

    pub async fn transcribe(&self, audio: UploadedAudio) -> Result<String, TranscriptionError> {
        let size = audio.size_bytes();
        let decoder = Arc::clone(&self.decoder);
        let buffer = self.pool.run(move || decoder.decode(&audio)).await??;

        tracing::debug!(
            upload_bytes = size,
            samples = buffer.len(),
            sample_rate = buffer.sample_rate(),
            duration_secs = buffer.duration_secs(),
            "Upload decoded"
        );

        let transcriber = Arc::clone(&self.transcriber);
        let start = Instant::now();
        let text = self
            .pool
            .run(move || transcriber.transcribe(buffer))
            .await??;

        tracing::info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            chars = text.len(),
            "Transcription completed"
        );

        Ok(text)
    }
}
