use zipformer_asr_api::domain::{SampleBuffer, SampleBufferError};

#[test]
fn given_samples_and_rate_when_creating_then_exposes_both() {
    let buffer = SampleBuffer::new(vec![0.0; 8_000], 16_000).unwrap();

    assert_eq!(buffer.len(), 8_000);
    assert_eq!(buffer.sample_rate(), 16_000);
    assert!(!buffer.is_empty());
    assert!((buffer.duration_secs() - 0.5).abs() < f32::EPSILON);
}

#[test]
fn given_no_samples_when_creating_then_returns_empty_error() {
    let result = SampleBuffer::new(Vec::new(), 16_000);

    assert_eq!(result, Err(SampleBufferError::Empty));
}

#[test]
fn given_zero_rate_when_creating_then_returns_invalid_rate_error() {
    let result = SampleBuffer::new(vec![0.1], 0);

    assert_eq!(result, Err(SampleBufferError::InvalidSampleRate(0)));
}

#[test]
fn given_buffer_when_consumed_then_returns_original_samples() {
    let buffer = SampleBuffer::new(vec![0.25, -0.5], 8_000).unwrap();

    assert_eq!(buffer.into_samples(), vec![0.25, -0.5]);
}
