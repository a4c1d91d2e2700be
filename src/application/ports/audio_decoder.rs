use crate::domain::{SampleBuffer, UploadedAudio};

/// Turns an untrusted upload into mono samples.
///
/// Implementations block (file parsing, subprocesses), so callers run them
/// off the async scheduler.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, audio: &UploadedAudio) -> Result<SampleBuffer, AudioDecoderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("empty input")]
    EmptyInput,
    #[error("payload too large: {size} bytes exceeds limit of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },
    #[error("unsupported audio format (filename: {filename:?}, content type: {content_type:?})")]
    UnsupportedFormat {
        filename: String,
        content_type: String,
    },
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("audio decoder unavailable: {0}")]
    DecoderUnavailable(String),
    #[error("decoded audio is empty")]
    EmptyDecodedAudio,
}
