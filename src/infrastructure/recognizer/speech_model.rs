use crate::application::ports::TranscriberError;

/// An acoustic model that turns samples at its own rate into raw text.
pub trait SpeechModel: Send + Sync {
    fn sample_rate(&self) -> u32;

    /// `samples` must already be at [`SpeechModel::sample_rate`].
    fn recognize(&self, samples: &[f32]) -> Result<String, TranscriberError>;
}
