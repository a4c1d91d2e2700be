use std::time::Instant;

use crate::application::ports::{Transcriber, TranscriberError};
use crate::domain::SampleBuffer;
use crate::infrastructure::audio::resample;

use super::model_downloader::{ModelDownloadError, ModelSource, resolve_model_dir};
use super::speech_model::SpeechModel;
use super::text_normalizer::normalize_transcript;
use super::zipformer_model::{ZipformerConfig, ZipformerModel};

#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    pub source: ModelSource,
    pub model: ZipformerConfig,
    pub normalize_text: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayLoadError {
    #[error("model artifacts: {0}")]
    Artifacts(#[from] ModelDownloadError),
    #[error(transparent)]
    Model(#[from] TranscriberError),
}

/// The one recognizer shared by every request.
///
/// Holds the loaded model read-only; buffers at a foreign rate are
/// resampled before recognition and nothing is kept between calls.
pub struct RecognizerGateway {
    model: Box<dyn SpeechModel>,
    normalize_text: bool,
}

impl RecognizerGateway {
    pub fn new(model: Box<dyn SpeechModel>, normalize_text: bool) -> Self {
        Self {
            model,
            normalize_text,
        }
    }

    /// Resolves the model artifacts (downloading them if needed) and builds
    /// the Zipformer model. Blocking; call it once at startup.
    pub fn load(config: &RecognizerConfig) -> Result<Self, GatewayLoadError> {
        let start = Instant::now();

        let artifacts = resolve_model_dir(&config.source)?;
        let model = ZipformerModel::load(&artifacts, &config.model)?;

        tracing::info!(
            repo_id = %config.source.repo_id,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Recognizer gateway ready"
        );

        Ok(Self::new(Box::new(model), config.normalize_text))
    }

    pub fn target_sample_rate(&self) -> u32 {
        self.model.sample_rate()
    }
}

impl Transcriber for RecognizerGateway {
    fn transcribe(&self, audio: SampleBuffer) -> Result<String, TranscriberError> {
        let target_rate = self.model.sample_rate();
        let audio = resample(audio, target_rate)
            .map_err(|e| TranscriberError::ResamplingFailed(e.to_string()))?;

        let raw = self.model.recognize(audio.samples())?;

        if self.normalize_text {
            Ok(normalize_transcript(&raw))
        } else {
            Ok(raw)
        }
    }
}
