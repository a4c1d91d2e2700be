use zipformer_asr_api::application::ports::{Transcriber, TranscriberError};
use zipformer_asr_api::domain::SampleBuffer;
use zipformer_asr_api::infrastructure::recognizer::RecognizerGateway;

use crate::helpers::{FailingModel, FixedTextModel, SampleCountModel};

#[test]
fn given_audio_at_model_rate_when_transcribing_then_samples_reach_model_untouched() {
    let gateway = RecognizerGateway::new(Box::new(SampleCountModel::new(16_000)), false);
    let audio = SampleBuffer::new(vec![0.0; 4_000], 16_000).unwrap();

    let text = gateway.transcribe(audio).unwrap();

    assert_eq!(text, "4000 samples");
    assert_eq!(gateway.target_sample_rate(), 16_000);
}

#[test]
fn given_audio_at_foreign_rate_when_transcribing_then_it_is_resampled_first() {
    let gateway = RecognizerGateway::new(Box::new(SampleCountModel::new(16_000)), false);
    let audio = SampleBuffer::new(vec![0.0; 48_000], 48_000).unwrap();

    let text = gateway.transcribe(audio).unwrap();

    assert_eq!(text, "16000 samples");
}

#[test]
fn given_normalization_enabled_when_transcribing_then_output_is_cleaned() {
    let gateway = RecognizerGateway::new(Box::new(FixedTextModel("  HELLO   WORLD ")), true);
    let audio = SampleBuffer::new(vec![0.0; 160], 16_000).unwrap();

    assert_eq!(gateway.transcribe(audio).unwrap(), "Hello world");
}

#[test]
fn given_normalization_disabled_when_transcribing_then_output_is_raw() {
    let gateway = RecognizerGateway::new(Box::new(FixedTextModel("  HELLO   WORLD ")), false);
    let audio = SampleBuffer::new(vec![0.0; 160], 16_000).unwrap();

    assert_eq!(gateway.transcribe(audio).unwrap(), "  HELLO   WORLD ");
}

#[test]
fn given_failing_model_when_transcribing_then_error_is_propagated() {
    let gateway = RecognizerGateway::new(Box::new(FailingModel), true);
    let audio = SampleBuffer::new(vec![0.0; 160], 16_000).unwrap();

    assert!(matches!(
        gateway.transcribe(audio),
        Err(TranscriberError::RecognitionFailed(_))
    ));
}
