use std::sync::Arc;
use std::time::Duration;

use zipformer_asr_api::application::ports::{AudioDecoderError, TranscriberError};
use zipformer_asr_api::application::services::{
    TranscriptionError, TranscriptionService, WorkerPool, WorkerPoolError,
};
use zipformer_asr_api::domain::UploadedAudio;
use zipformer_asr_api::infrastructure::audio::UploadAudioDecoder;
use zipformer_asr_api::infrastructure::recognizer::{RecognizerGateway, SpeechModel};

use crate::helpers::{FailingModel, SampleCountModel, SlowModel, silence_wav};

fn service(model: impl SpeechModel + 'static, timeout: Option<Duration>) -> TranscriptionService {
    TranscriptionService::new(
        Arc::new(UploadAudioDecoder::default()),
        Arc::new(RecognizerGateway::new(Box::new(model), false)),
        WorkerPool::new(2, timeout),
    )
}

fn wav_upload(data: Vec<u8>) -> UploadedAudio {
    UploadedAudio::new(data, Some("clip.wav"), Some("audio/wav"))
}

#[tokio::test]
async fn given_valid_wav_when_transcribing_then_returns_model_text() {
    let service = service(SampleCountModel::new(16_000), None);

    let text = service
        .transcribe(wav_upload(silence_wav(16_000, 3_200)))
        .await
        .unwrap();

    assert_eq!(text, "3200 samples");
}

#[tokio::test]
async fn given_empty_upload_when_transcribing_then_returns_decoding_error() {
    let service = service(SampleCountModel::new(16_000), None);

    let result = service.transcribe(wav_upload(Vec::new())).await;

    assert!(matches!(
        result,
        Err(TranscriptionError::Decoding(AudioDecoderError::EmptyInput))
    ));
}

#[tokio::test]
async fn given_failing_model_when_transcribing_then_returns_transcription_error() {
    let service = service(FailingModel, None);

    let result = service
        .transcribe(wav_upload(silence_wav(16_000, 160)))
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::Transcription(
            TranscriberError::RecognitionFailed(_)
        ))
    ));
}

#[tokio::test]
async fn given_slow_model_when_job_times_out_then_returns_worker_timeout() {
    let service = service(
        SlowModel(Duration::from_millis(400)),
        Some(Duration::from_millis(30)),
    );

    let result = service
        .transcribe(wav_upload(silence_wav(16_000, 160)))
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::Worker(WorkerPoolError::Timeout(_)))
    ));
}
