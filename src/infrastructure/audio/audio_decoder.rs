use crate::application::ports::{AudioDecoder, AudioDecoderError};
use crate::domain::{AudioFormat, SampleBuffer, UploadedAudio};

use super::ffmpeg_decoder::FfmpegAudioDecoder;
use super::wav_decoder::decode_wav;

pub use super::ffmpeg_decoder::check_ffmpeg_binary;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Validates an upload and dispatches it to the decoder for its format.
#[derive(Debug, Clone)]
pub struct UploadAudioDecoder {
    max_bytes: usize,
    ffmpeg: FfmpegAudioDecoder,
}

impl Default for UploadAudioDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_BYTES, FfmpegAudioDecoder::default())
    }
}

impl UploadAudioDecoder {
    pub fn new(max_bytes: usize, ffmpeg: FfmpegAudioDecoder) -> Self {
        Self { max_bytes, ffmpeg }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    fn validate_size(&self, size: usize) -> Result<(), AudioDecoderError> {
        if size == 0 {
            return Err(AudioDecoderError::EmptyInput);
        }
        if size > self.max_bytes {
            return Err(AudioDecoderError::PayloadTooLarge {
                size,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}

impl AudioDecoder for UploadAudioDecoder {
    fn decode(&self, audio: &UploadedAudio) -> Result<SampleBuffer, AudioDecoderError> {
        self.validate_size(audio.size_bytes())?;

        let format = AudioFormat::classify(audio.filename(), audio.content_type());

        tracing::debug!(
            bytes = audio.size_bytes(),
            filename = %audio.filename(),
            content_type = %audio.content_type(),
            format = %format,
            "Decoding upload"
        );

        match format {
            AudioFormat::Wav => decode_wav(audio.data()),
            AudioFormat::Compressed(_) => self.ffmpeg.decode(audio.data()),
            AudioFormat::Unsupported => Err(AudioDecoderError::UnsupportedFormat {
                filename: audio.filename().to_string(),
                content_type: audio.content_type().to_string(),
            }),
        }
    }
}
