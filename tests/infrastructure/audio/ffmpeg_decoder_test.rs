use zipformer_asr_api::application::ports::AudioDecoderError;
use zipformer_asr_api::infrastructure::audio::{
    FFMPEG_OUTPUT_SAMPLE_RATE, FfmpegAudioDecoder, check_ffmpeg_binary,
};

use crate::helpers::{ffmpeg_available, silence_wav};

#[test]
fn given_missing_binary_when_decoding_then_returns_decoder_unavailable() {
    let decoder = FfmpegAudioDecoder::new("/nonexistent/bin/ffmpeg-missing");

    let result = decoder.decode(&[1, 2, 3, 4]);

    assert!(matches!(result, Err(AudioDecoderError::DecoderUnavailable(_))));
}

#[test]
fn given_missing_binary_when_checking_then_returns_decoder_unavailable() {
    let decoder = FfmpegAudioDecoder::new("/nonexistent/bin/ffmpeg-missing");

    assert!(matches!(
        decoder.check_binary(),
        Err(AudioDecoderError::DecoderUnavailable(_))
    ));
}

#[test]
fn given_empty_input_when_decoding_then_returns_empty_input() {
    let decoder = FfmpegAudioDecoder::default();

    assert!(matches!(
        decoder.decode(&[]),
        Err(AudioDecoderError::EmptyInput)
    ));
}

#[test]
fn given_ffmpeg_on_path_when_checking_then_reports_version() {
    if !ffmpeg_available() {
        eprintln!("Skipping test: ffmpeg not available");
        return;
    }

    let version = check_ffmpeg_binary().unwrap();

    assert!(version.to_lowercase().contains("ffmpeg"));
}

#[test]
fn given_ffmpeg_on_path_when_decoding_garbage_then_returns_decoding_failed() {
    if !ffmpeg_available() {
        eprintln!("Skipping test: ffmpeg not available");
        return;
    }

    let result = FfmpegAudioDecoder::default().decode(&[0x13u8; 2_048]);

    assert!(matches!(result, Err(AudioDecoderError::DecodingFailed(_))));
}

#[test]
fn given_ffmpeg_on_path_when_decoding_8khz_wav_then_output_is_16khz_mono() {
    if !ffmpeg_available() {
        eprintln!("Skipping test: ffmpeg not available");
        return;
    }

    let buffer = FfmpegAudioDecoder::default()
        .decode(&silence_wav(8_000, 8_000))
        .unwrap();

    assert_eq!(buffer.sample_rate(), FFMPEG_OUTPUT_SAMPLE_RATE);
    let expected = 16_000i64;
    assert!((buffer.len() as i64 - expected).abs() < 400, "{}", buffer.len());
}
