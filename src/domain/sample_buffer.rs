/// Mono audio samples paired with the rate they were captured at.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleBufferError {
    #[error("sample buffer is empty")]
    Empty,
    #[error("invalid sample rate: {0}")]
    InvalidSampleRate(u32),
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self, SampleBufferError> {
        if sample_rate == 0 {
            return Err(SampleBufferError::InvalidSampleRate(sample_rate));
        }
        if samples.is_empty() {
            return Err(SampleBufferError::Empty);
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Never true for a constructed buffer.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
