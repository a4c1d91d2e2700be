use crate::domain::SampleBuffer;

/// Speech-to-text over an already decoded buffer.
///
/// Implementations block on inference, so callers run them off the async
/// scheduler.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: SampleBuffer) -> Result<String, TranscriberError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriberError {
    #[error("resampling failed: {0}")]
    ResamplingFailed(String),
    #[error("recognition failed: {0}")]
    RecognitionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
}
